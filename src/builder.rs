// -----------------------------------------------------------------------------------------------
// Tomlcore - TOML v1.0.0 parser and document model
//
// Copyright (c) 2023, Frank Sommer.
// All rights reserved.
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// * Redistributions of source code must retain the above copyright notice, this
//   list of conditions and the following disclaimer.
//
// * Redistributions in binary form must reproduce the above copyright notice,
//   this list of conditions and the following disclaimer in the documentation
//   and/or other materials provided with the distribution.
//
// * Neither the name of the copyright holder nor the names of its
//   contributors may be used to endorse or promote products derived from
//   this software without specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
// DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
// FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
// DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
// SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
// CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
// OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
// OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
// -----------------------------------------------------------------------------------------------

//! Programmatic construction of TOML documents.
//! The builder interface is a thin set of constructors over the document tree; documents built
//! here use the same node model as parsed documents and serialize through the same code.

use crate::document::{KeyKind, TomlDocument, TomlFloat, TomlKey, TomlNode, TomlValue};
use crate::errorhandling::*;
use crate::tomlxe;

impl TomlDocument {
    /// Inserts a value under the given key path.
    /// Intermediate path segments are created as needed; the rules for dotted keys apply, so an
    /// existing leaf key cannot be overwritten.
    ///
    /// # Arguments
    /// * `path` - the key path, one segment per element
    /// * `value` - the value to insert
    ///
    /// # Errors
    /// Returns a structure containing error information, if the path is empty or conflicts
    /// with an existing definition
    pub fn put<V: Into<TomlValue>>(&mut self, path: &[&str],
                                   value: V) -> Result<(), TomlException> {
        if path.is_empty() {
            return Err(tomlxe!(E_TOML_KEY_EXPECTED))
        }
        let parts = path.iter().map(|p| p.to_string()).collect::<Vec<String>>();
        let key = TomlKey::from_parts(parts, 0);
        let limits = *self.limits();
        self.root_mut().insert_pair(&key, value.into(), &limits)
    }

    /// Converts the document to an indented plain-text form.
    /// Leaf keys print as key = value lines, tables indent their children by two spaces,
    /// array of tables entries print with their entry index.
    pub fn to_pretty(&self) -> String {
        let mut buffer = String::with_capacity(4096);
        pretty_node_list(self.root(), 0, &mut buffer);
        buffer
    }
}

/// Appends the indented form of all children of a node to the buffer.
///
/// # Arguments
/// * `node` - the node whose children shall be printed
/// * `indent` - the number of spaces to prepend before each output line
/// * `buffer` - the string buffer receiving the output
fn pretty_node_list(node: &TomlNode, indent: usize, buffer: &mut String) {
    let pad = " ".repeat(indent);
    for (id, child) in node.child_items() {
        match child.kind() {
            KeyKind::ArrayTable => {
                if let Some(TomlValue::Array(entries)) = child.value() {
                    for (i, entry) in entries.iter().enumerate() {
                        buffer.push_str(&pad);
                        buffer.push_str(id);
                        buffer.push('[');
                        buffer.push_str(&i.to_string());
                        buffer.push_str("]\n");
                        if let TomlValue::Table(t) = entry {
                            for (sub_id, sub_node) in t.iter() {
                                pretty_entry(sub_id, sub_node, indent + 2, buffer);
                            }
                        }
                    }
                }
            },
            _ => pretty_entry(id, child, indent, buffer)
        }
    }
}

/// Appends the indented form of one key node to the buffer.
///
/// # Arguments
/// * `id` - the key identifier
/// * `node` - the key node
/// * `indent` - the number of spaces to prepend before each output line
/// * `buffer` - the string buffer receiving the output
fn pretty_entry(id: &str, node: &TomlNode, indent: usize, buffer: &mut String) {
    let pad = " ".repeat(indent);
    buffer.push_str(&pad);
    buffer.push_str(id);
    match node.value() {
        Some(_) => {
            buffer.push_str(" = ");
            buffer.push_str(&node.to_string());
            buffer.push('\n');
        },
        None => {
            buffer.push('\n');
            pretty_node_list(node, indent + 2, buffer);
        }
    }
}

impl From<&str> for TomlValue {
    fn from(val: &str) -> TomlValue {
        TomlValue::String(val.to_string())
    }
}

impl From<String> for TomlValue {
    fn from(val: String) -> TomlValue {
        TomlValue::String(val)
    }
}

impl From<bool> for TomlValue {
    fn from(val: bool) -> TomlValue {
        TomlValue::Boolean(val)
    }
}

impl From<i64> for TomlValue {
    fn from(val: i64) -> TomlValue {
        TomlValue::Integer(val)
    }
}

impl From<f64> for TomlValue {
    fn from(val: f64) -> TomlValue {
        // precision follows the shortest decimal form of the value
        let plain = format!("{}", val);
        let precision = match plain.find('.') {
            Some(pos) => plain.len() - pos - 1,
            None => 0
        };
        TomlValue::Float(TomlFloat { value: val, precision, scientific: false })
    }
}

impl From<Vec<TomlValue>> for TomlValue {
    fn from(val: Vec<TomlValue>) -> TomlValue {
        TomlValue::Array(val)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_documents_serialize_like_parsed_ones() {
        let mut doc = TomlDocument::default();
        doc.put(&["title"], "example").unwrap();
        doc.put(&["owner", "name"], "Tom").unwrap();
        doc.put(&["owner", "active"], true).unwrap();
        doc.put(&["size"], 42i64).unwrap();
        let parsed = crate::parse_str(concat!(
            "title = \"example\"\n",
            "owner.name = \"Tom\"\n",
            "owner.active = true\n",
            "size = 42\n")).unwrap();
        assert_eq!(parsed.to_json(), doc.to_json());
    }

    #[test]
    fn put_rejects_conflicts() {
        let mut doc = TomlDocument::default();
        doc.put(&["a"], 1i64).unwrap();
        let ex = doc.put(&["a", "b"], 2i64).unwrap_err();
        assert_eq!(E_TOML_KEY_ALREADY_IN_USE, ex.id());
        let ex = doc.put(&[], 1i64).unwrap_err();
        assert_eq!(E_TOML_KEY_EXPECTED, ex.id());
    }

    #[test]
    fn float_conversion_keeps_precision() {
        let v: TomlValue = TomlValue::from(2.5f64);
        match v {
            TomlValue::Float(f) => {
                assert_eq!(1, f.precision);
                assert!(! f.scientific);
            },
            _ => panic!("not a float")
        }
    }

    #[test]
    fn pretty_print() {
        let mut doc = TomlDocument::default();
        doc.put(&["title"], "example").unwrap();
        doc.put(&["owner", "name"], "Tom").unwrap();
        let expected = concat!(
            "owner\n",
            "  name = \"Tom\"\n",
            "title = \"example\"\n");
        assert_eq!(expected, doc.to_pretty());
    }

    #[test]
    fn pretty_print_array_tables() {
        let doc = crate::parse_str("[[t]]\nx = 1\n[[t]]\nx = 2\n").unwrap();
        let expected = concat!(
            "t[0]\n",
            "  x = 1\n",
            "t[1]\n",
            "  x = 2\n");
        assert_eq!(expected, doc.to_pretty());
    }
}

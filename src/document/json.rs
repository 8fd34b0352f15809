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

//! Canonical typed-JSON serialization of TOML documents.
//! Every scalar value becomes an object carrying its type tag and its value as a string, tables
//! become JSON objects and arrays JSON arrays. The form is the common ground for conformance
//! testing across TOML implementations.

use super::*;

impl TomlDocument {
    /// Converts the document to its canonical typed-JSON form.
    pub fn to_json(&self) -> String {
        let mut buffer = String::with_capacity(8192);
        encode_table(&self.root.children, &mut buffer);
        buffer
    }
}

/// Appends the typed-JSON encoding of a table to the buffer.
///
/// # Arguments
/// * `table` - the table to encode
/// * `buffer` - the string buffer receiving the JSON formatted data
fn encode_table(table: &TomlTable, buffer: &mut String) {
    buffer.push('{');
    for (i, (id, node)) in table.iter().enumerate() {
        if i > 0 { buffer.push_str(", "); }
        encode_string(id, buffer);
        buffer.push_str(": ");
        encode_node(node, buffer);
    }
    buffer.push('}');
}

/// Appends the typed-JSON encoding of a key node to the buffer.
/// Leaf keys encode their value, an array of tables encodes its entries as an array of objects,
/// all other kinds encode their child table.
///
/// # Arguments
/// * `node` - the key node to encode
/// * `buffer` - the string buffer receiving the JSON formatted data
fn encode_node(node: &TomlNode, buffer: &mut String) {
    match (node.kind, &node.value) {
        (KeyKind::ArrayTable, Some(TomlValue::Array(entries))) => {
            buffer.push('[');
            for (i, entry) in entries.iter().enumerate() {
                if i > 0 { buffer.push_str(", "); }
                encode_value(entry, buffer);
            }
            buffer.push(']');
        },
        (_, Some(v)) => encode_value(v, buffer),
        (_, None) => encode_table(&node.children, buffer)
    }
}

/// Appends the typed-JSON encoding of a value to the buffer.
/// Scalars become an object with type tag and stringified value, arrays and tables recurse.
///
/// # Arguments
/// * `value` - the value to encode
/// * `buffer` - the string buffer receiving the JSON formatted data
fn encode_value(value: &TomlValue, buffer: &mut String) {
    match value {
        TomlValue::Array(a) => {
            buffer.push('[');
            for (i, v) in a.iter().enumerate() {
                if i > 0 { buffer.push_str(", "); }
                encode_value(v, buffer);
            }
            buffer.push(']');
        },
        TomlValue::Table(t) => encode_table(t, buffer),
        _ => {
            buffer.push_str("{\"type\": \"");
            buffer.push_str(scalar_tag(value));
            buffer.push_str("\", \"value\": ");
            encode_string(&scalar_repr(value), buffer);
            buffer.push('}');
        }
    }
}

/// Returns the type tag of a scalar value.
fn scalar_tag(value: &TomlValue) -> &'static str {
    match value {
        TomlValue::String(_) => "string",
        TomlValue::Boolean(_) => "bool",
        TomlValue::Integer(_) => "integer",
        TomlValue::Float(_) => "float",
        TomlValue::OffsetDateTime(_, _) => "datetime",
        TomlValue::LocalDateTime(_, _) => "datetime-local",
        TomlValue::LocalDate(_) => "date-local",
        TomlValue::LocalTime(_, _) => "time-local",
        TomlValue::Array(_) | TomlValue::Table(_) => ""
    }
}

/// Returns the canonical string form of a scalar value.
/// Floats honor the spelled precision and exponent notation, date-time values render through
/// their recorded format.
fn scalar_repr(value: &TomlValue) -> String {
    match value {
        TomlValue::String(s) => s.clone(),
        TomlValue::Boolean(val) => val.to_string(),
        TomlValue::Integer(val) => val.to_string(),
        TomlValue::Float(val) => format_float(val),
        TomlValue::OffsetDateTime(val, fmt) => val.format(fmt).to_string(),
        TomlValue::LocalDateTime(val, fmt) => val.format(fmt).to_string(),
        TomlValue::LocalDate(val) => val.format("%Y-%m-%d").to_string(),
        TomlValue::LocalTime(val, fmt) => val.format(fmt).to_string(),
        TomlValue::Array(_) | TomlValue::Table(_) => String::new()
    }
}

/// Returns the canonical string form of a float value.
/// The spelled precision determines the number of digits after the decimal point; values
/// spelled with an exponent render in scientific notation with a sign and at least two
/// exponent digits.
pub(crate) fn format_float(val: &TomlFloat) -> String {
    if val.value.is_nan() { return String::from("nan") }
    if val.value.is_infinite() {
        return String::from(if val.value > 0.0 { "inf" } else { "-inf" })
    }
    if val.scientific {
        let plain = format!("{:.*e}", val.precision, val.value);
        return match plain.split_once('e') {
            Some((mantissa, exp)) => {
                let exp_val = exp.parse::<i32>().unwrap_or(0);
                let exp_sign = if exp_val < 0 { '-' } else { '+' };
                format!("{}e{}{:02}", mantissa, exp_sign, exp_val.abs())
            },
            None => plain
        }
    }
    if val.precision == 0 {
        // a float without spelled fraction digits still renders with one decimal place
        return format!("{:.1}", val.value)
    }
    format!("{:.*}", val.precision, val.value)
}

/// Returns the given string as a JSON string literal.
pub(crate) fn json_string(s: &str) -> String {
    let mut buffer = String::with_capacity(s.len() + 2);
    encode_string(s, &mut buffer);
    buffer
}

/// Appends a JSON string literal to the buffer.
/// The escapes \b \n \r \t \f \\ \" are applied, all other characters are copied verbatim.
///
/// # Arguments
/// * `s` - the string to encode
/// * `buffer` - the string buffer receiving the JSON formatted data
fn encode_string(s: &str, buffer: &mut String) {
    buffer.push('"');
    for ch in s.chars() {
        match ch {
            '"' => buffer.push_str("\\\""),
            '\\' => buffer.push_str("\\\\"),
            '\u{0008}' => buffer.push_str("\\b"),
            '\u{000c}' => buffer.push_str("\\f"),
            '\n' => buffer.push_str("\\n"),
            '\r' => buffer.push_str("\\r"),
            '\t' => buffer.push_str("\\t"),
            _ => buffer.push(ch)
        }
    }
    buffer.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn float(value: f64, precision: usize, scientific: bool) -> TomlFloat {
        TomlFloat { value, precision, scientific }
    }

    #[test]
    fn float_formats() {
        assert_eq!("3.14", format_float(&float(3.14, 2, false)));
        assert_eq!("0.0", format_float(&float(0.0, 1, false)));
        assert_eq!("0.0", format_float(&float(0.0, 0, false)));
        assert_eq!("-0.01", format_float(&float(-0.01, 2, false)));
        assert_eq!("5e+02", format_float(&float(500.0, 0, true)));
        assert_eq!("6.26e-34", format_float(&float(6.26e-34, 2, true)));
        assert_eq!("1e+06", format_float(&float(1000000.0, 0, true)));
        assert_eq!("inf", format_float(&float(f64::INFINITY, 0, false)));
        assert_eq!("-inf", format_float(&float(f64::NEG_INFINITY, 0, false)));
        assert_eq!("nan", format_float(&float(f64::NAN, 0, false)));
    }

    #[test]
    fn string_escapes() {
        assert_eq!("\"a\\\"b\"", json_string("a\"b"));
        assert_eq!("\"tab\\there\"", json_string("tab\there"));
        assert_eq!("\"nl\\nnl\"", json_string("nl\nnl"));
        assert_eq!("\"back\\\\slash\"", json_string("back\\slash"));
        assert_eq!("\"\\b\\f\\r\"", json_string("\u{0008}\u{000c}\r"));
        // other characters are copied verbatim
        assert_eq!("\"\u{e9}\u{1f600}\"", json_string("\u{e9}\u{1f600}"));
    }
}

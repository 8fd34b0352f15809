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

//! Tomlcore TOML document.
//! A document represents all definitions made in a TOML formatted string or file as a tree of
//! key nodes. Every node carries a kind tag describing how its key was introduced; the kind
//! pair of an existing node and a newly arriving definition decides whether the definition is
//! legal, expressed in one explicit redefinition table.

use chrono::DateTime;
use chrono::naive::{NaiveDate, NaiveDateTime, NaiveTime};
use chrono::offset::FixedOffset;
use std::collections::BTreeMap;
use std::collections::btree_map::{Entry, Iter};
use std::fmt;
use crate::errorhandling::*;
use crate::limits::TomlLimits;
use crate::quoted;
use crate::tomlxe;

pub mod json;

/// Kind tag of a document tree node.
/// The kind records how the node's key was introduced in the TOML source.
#[derive (Clone, Copy, Debug, Eq, PartialEq)]
pub enum KeyKind {
    /// intermediate segment of a dotted-key assignment (a.b = 1 introduces a as Key)
    Key,
    /// final segment of a dotted-key assignment, holds the value
    KeyLeaf,
    /// intermediate segment of a table header ([a.b] introduces a as Table)
    Table,
    /// final segment of a table header
    TableLeaf,
    /// final segment of an array of tables header [[t]]
    ArrayTable
}

/// Type for TOML tables, a mapping from identifier to key node.
/// BTreeMap is used, since it's using sorted entries and hence making test verification easier
pub type TomlTable = BTreeMap<String, TomlNode>;

/// TOML document.
/// A document represents all definitions made in a TOML formatted string or file, structured in
/// a suitable form for processing by software.
#[derive (Clone, Debug)]
pub struct TomlDocument {
    // root of the node tree, an anonymous table
    root: TomlNode,
    // key of currently selected table or array of tables
    selection: Option<TomlKey>,
    // structural limits, applied when keys are added
    limits: TomlLimits
}
impl TomlDocument {
    /// Creates an empty document.
    ///
    /// # Arguments
    /// * `limits` - the structural limits to apply to key insertions
    pub(crate) fn new(limits: TomlLimits) -> TomlDocument {
        TomlDocument { root: TomlNode::table_root(), selection: None, limits }
    }

    /// Returns the document's root node.
    #[inline]
    pub fn root(&self) -> &TomlNode {
        &self.root
    }

    /// Returns all items in the document's root table.
    pub fn root_items(&self) -> Iter<String, TomlNode> {
        self.root.children.iter()
    }

    /// Returns a direct child of the document root by identifier, or the root itself if the
    /// identifier denotes the anonymous root key.
    ///
    /// # Arguments
    /// * `id` - the key identifier
    pub fn get_key(&self, id: &str) -> Option<&TomlNode> {
        if id == self.root.id { return Some(&self.root) }
        self.root.get_key(id)
    }

    /// Selects a certain item within the document for subsequent insertion of key-value-pairs.
    /// Called by the parser, when a table header has been detected.
    /// All prefix parts of the key are created as intermediate tables if they don't exist;
    /// the redefinition table decides whether existing nodes may be reused.
    ///
    /// # Arguments
    /// * `key` - the key within the (double) brackets of the header in the TOML formatted input
    /// * `double_brackets` - indicates whether the header denotes an array of tables (true)
    ///                       or a table (false)
    ///
    /// # Errors
    /// Returns a structure containing error information, if a part of the key conflicts with an
    /// existing definition
    pub(crate) fn header_selected(&mut self, key: &TomlKey,
                                  double_brackets: bool) -> Result<(), TomlException> {
        let limits = self.limits;
        let mut node = &mut self.root;
        for part in key.prefix() {
            node = node.add_subkey(part, KeyKind::Table, &limits)?;
        }
        let leaf_kind = if double_brackets { KeyKind::ArrayTable } else { KeyKind::TableLeaf };
        node.add_subkey(key.main_part(), leaf_kind, &limits)?;
        self.selection = Some(key.clone());
        Ok(())
    }

    /// Inserts a TOML value under the currently selected table.
    ///
    /// # Arguments
    /// * `key` - the key used on the left hand side of the key-value-pair
    /// * `value` - the value specified on the right hand side of the key-value-pair
    ///
    /// # Errors
    /// Returns a structure containing error information, if the insertion fails
    pub(crate) fn insert(&mut self, key: &TomlKey,
                         value: TomlValue) -> Result<(), TomlException> {
        let limits = self.limits;
        let mut node = &mut self.root;
        if let Some(sel) = &self.selection {
            for part in sel.all_parts() {
                node = node.resolve_child(part)?;
            }
        }
        node.insert_pair(key, value, &limits)
    }

    /// Returns the document's root node for modification.
    /// Used by the programmatic construction interface.
    #[inline]
    pub(crate) fn root_mut(&mut self) -> &mut TomlNode {
        &mut self.root
    }

    /// Returns the structural limits the document applies to key insertions.
    #[inline]
    pub(crate) fn limits(&self) -> &TomlLimits {
        &self.limits
    }
}
impl Default for TomlDocument {
    fn default() -> Self {
        TomlDocument::new(TomlLimits::default())
    }
}

/// Node of the document tree.
/// A node represents one key of the TOML document. It carries the kind tag describing how the
/// key was introduced, the child keys underneath it and, for leaf keys, the associated value.
/// For an array of tables the value slot holds the ordered entry tables; child keys arriving
/// while the node is selected attach to the most recently opened entry.
#[derive (Clone, Debug, PartialEq)]
pub struct TomlNode {
    // kind tag, decides over redefinitions
    kind: KeyKind,
    // key identifier
    id: String,
    // child keys by identifier
    children: TomlTable,
    // value slot, filled for KeyLeaf and ArrayTable nodes
    value: Option<TomlValue>
}
impl TomlNode {
    /// Creates a node for the specified key identifier and kind.
    /// An array of tables node is born with its first, empty entry.
    fn new(id: &str, kind: KeyKind) -> TomlNode {
        let value = match kind {
            KeyKind::ArrayTable => {
                Some(TomlValue::Array(vec!(TomlValue::Table(TomlTable::new()))))
            },
            _ => None
        };
        TomlNode { kind, id: id.to_string(), children: TomlTable::new(), value }
    }

    /// Creates an anonymous table node, used for the document root and for inline tables.
    pub(crate) fn table_root() -> TomlNode {
        TomlNode::new("", KeyKind::Table)
    }

    /// Returns the node's kind tag.
    #[inline]
    pub fn kind(&self) -> KeyKind {
        self.kind
    }

    /// Returns the node's key identifier.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the node's value.
    ///
    /// # Return values
    /// a reference to the value; **None** if the node does not hold a value
    #[inline]
    pub fn value(&self) -> Option<&TomlValue> {
        self.value.as_ref()
    }

    /// Returns the key and value of all direct children.
    /// For an array of tables the children of the most recently opened entry are returned.
    pub fn child_items(&self) -> Iter<String, TomlNode> {
        self.active_table().iter()
    }

    /// Returns a direct child by identifier.
    /// For an array of tables the most recently opened entry is searched.
    ///
    /// # Arguments
    /// * `id` - the key identifier
    pub fn get_key(&self, id: &str) -> Option<&TomlNode> {
        self.active_table().get(id)
    }

    /// Discards the node shell and returns its child table.
    /// Used for inline tables, which are stored as plain table values.
    pub(crate) fn into_children(self) -> TomlTable {
        self.children
    }

    /// Adds a child key underneath this node, or revisits an existing child of the same
    /// identifier. The redefinition table decides whether the combination of the existing
    /// child's kind and the requested kind is legal.
    /// For an array of tables the child is attached to the most recently opened entry.
    ///
    /// # Arguments
    /// * `id` - the key identifier
    /// * `kind` - the kind tag the definition requests
    /// * `limits` - the structural limits to apply
    ///
    /// # Return values
    /// the child node
    ///
    /// # Errors
    /// Returns a structure containing error information, if the definition conflicts with an
    /// existing child or the subkey limit is exceeded
    pub(crate) fn add_subkey(&mut self, id: &str, kind: KeyKind,
                             limits: &TomlLimits) -> Result<&mut TomlNode, TomlException> {
        let max_subkeys = limits.max_subkeys;
        let table = self.active_table_mut()?;
        if ! table.contains_key(id) && table.len() >= max_subkeys {
            return Err(tomlxe!(E_TOML_TOO_MANY_SUBKEYS, max_subkeys.to_string()))
        }
        match table.entry(id.to_string()) {
            Entry::Vacant(slot) => Ok(slot.insert(TomlNode::new(id, kind))),
            Entry::Occupied(slot) => {
                let existing = slot.into_mut();
                match redefinition(existing.kind, kind) {
                    Redefinition::Merge => Ok(existing),
                    Redefinition::MorphToTableLeaf => {
                        // a table created through a header prefix may be defined by its own
                        // header once; afterwards the node counts as explicitly defined
                        existing.kind = KeyKind::TableLeaf;
                        Ok(existing)
                    },
                    Redefinition::AppendEntry => {
                        existing.push_entry();
                        Ok(existing)
                    },
                    Redefinition::Conflict(code) => Err(tomlxe!(code, quoted(id)))
                }
            }
        }
    }

    /// Inserts a key-value pair underneath this node.
    /// Prefix parts of a dotted key are created as intermediate Key nodes, the final part
    /// becomes a KeyLeaf holding the value.
    ///
    /// # Arguments
    /// * `key` - the key used on the left hand side of the key-value-pair
    /// * `value` - the value specified on the right hand side of the key-value-pair
    /// * `limits` - the structural limits to apply
    ///
    /// # Errors
    /// Returns a structure containing error information, if a part of the key conflicts with an
    /// existing definition
    pub(crate) fn insert_pair(&mut self, key: &TomlKey, value: TomlValue,
                              limits: &TomlLimits) -> Result<(), TomlException> {
        let mut node = self;
        for part in key.prefix() {
            node = node.add_subkey(part, KeyKind::Key, limits)?;
        }
        let leaf = node.add_subkey(key.main_part(), KeyKind::KeyLeaf, limits)?;
        leaf.value = Some(value);
        Ok(())
    }

    /// Appends a fresh entry to an array of tables.
    /// Subsequent key-value pairs and subtables attach to this entry.
    fn push_entry(&mut self) {
        if let Some(TomlValue::Array(entries)) = self.value.as_mut() {
            entries.push(TomlValue::Table(TomlTable::new()));
        }
    }

    /// Returns the table child keys attach to.
    /// For an array of tables this is the most recently opened entry, for all other kinds the
    /// node's own child table.
    fn active_table(&self) -> &TomlTable {
        if self.kind == KeyKind::ArrayTable {
            if let Some(TomlValue::Array(entries)) = self.value.as_ref() {
                if let Some(TomlValue::Table(t)) = entries.last() {
                    return t
                }
            }
        }
        &self.children
    }

    /// Returns the table child keys attach to, for modification.
    ///
    /// # Errors
    /// Returns a structure containing error information, if an array of tables node carries no
    /// entry table. Cannot happen for nodes built through add_subkey.
    fn active_table_mut(&mut self) -> Result<&mut TomlTable, TomlException> {
        if self.kind != KeyKind::ArrayTable {
            return Ok(&mut self.children)
        }
        let missing_entry = tomlxe!(E_TOML_NOT_A_TABLE, quoted(&self.id));
        if let Some(TomlValue::Array(entries)) = self.value.as_mut() {
            if let Some(TomlValue::Table(t)) = entries.last_mut() {
                return Ok(t)
            }
        }
        Err(missing_entry)
    }

    /// Returns a direct child for modification.
    /// Used to resolve the selected table of a document; the path has been validated when the
    /// selection was established.
    ///
    /// # Arguments
    /// * `id` - the key identifier
    fn resolve_child(&mut self, id: &str) -> Result<&mut TomlNode, TomlException> {
        let table = self.active_table_mut()?;
        match table.get_mut(id) {
            Some(node) => Ok(node),
            None => Err(tomlxe!(E_TOML_NOT_A_TABLE, quoted(id)))
        }
    }
}
impl fmt::Display for TomlNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.value, self.kind) {
            (Some(TomlValue::Array(entries)), KeyKind::ArrayTable) => {
                write!(f, "[")?;
                for (i, e) in entries.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", e)?;
                }
                write!(f, "]")
            },
            (Some(v), _) => write!(f, "{}", v),
            (None, _) => write!(f, "{}", TomlValue::Table(self.children.clone()))
        }
    }
}

/// Outcome of matching an existing node against a new definition of the same identifier.
#[derive (Clone, Copy, Debug, Eq, PartialEq)]
enum Redefinition {
    /// reuse the existing node unchanged
    Merge,
    /// reuse the existing node, its kind changes from Table to TableLeaf
    MorphToTableLeaf,
    /// append another entry to an existing array of tables
    AppendEntry,
    /// definitions conflict, the argument holds the error code
    Conflict(&'static str)
}

/// The redefinition table.
/// Decides for every combination of an existing node's kind and the kind requested by a new
/// definition of the same identifier whether the definition is legal and what happens to the
/// existing node.
fn redefinition(existing: KeyKind, requested: KeyKind) -> Redefinition {
    use KeyKind::*;
    match (existing, requested) {
        (Key, Key) | (Key, Table) => Redefinition::Merge,
        (Table, Key) | (Table, Table) => Redefinition::Merge,
        (Table, TableLeaf) => Redefinition::MorphToTableLeaf,
        (TableLeaf, Key) | (TableLeaf, Table) => Redefinition::Merge,
        (TableLeaf, TableLeaf) => Redefinition::Conflict(E_TOML_TABLE_REDEFINED),
        (ArrayTable, Table) => Redefinition::Merge,
        (ArrayTable, ArrayTable) => Redefinition::AppendEntry,
        (KeyLeaf, _) | (_, KeyLeaf) => Redefinition::Conflict(E_TOML_KEY_ALREADY_IN_USE),
        (ArrayTable, _) => Redefinition::Conflict(E_TOML_ARRAY_OF_TABLES_REDEFINED),
        (_, ArrayTable) => Redefinition::Conflict(E_TOML_NOT_AN_ARRAY_OF_TABLES),
        (Key, TableLeaf) => Redefinition::Conflict(E_TOML_KEY_ALREADY_IN_USE)
    }
}

/// Presentation attributes of a TOML float value.
/// Besides the numeric value the spelled precision and exponent notation are kept, so the
/// value serializes with the fidelity it was written with.
#[derive (Clone, Copy, Debug, PartialEq)]
pub struct TomlFloat {
    /// the numeric value
    pub value: f64,
    /// number of digits after the decimal point as spelled
    pub precision: usize,
    /// indicates whether the value was spelled with an exponent
    pub scientific: bool
}

/// Enumeration for all kinds of TOML values.
/// TOML values are on the right hand side of a key-value pair.
#[derive (Clone, Debug, PartialEq)]
pub enum TomlValue {
    String (String),
    Boolean (bool),
    Integer (i64),
    Float (TomlFloat),
    /// value plus the format needed to re-serialize it exactly as spelled
    OffsetDateTime (DateTime<FixedOffset>, String),
    /// value plus the format needed to re-serialize it exactly as spelled
    LocalDateTime (NaiveDateTime, String),
    LocalDate (NaiveDate),
    /// value plus the format needed to re-serialize it exactly as spelled
    LocalTime (NaiveTime, String),
    Array (Vec<TomlValue>),
    /// inline tables and array of tables entries
    Table (TomlTable)
}
impl TomlValue {
    /// Returns the string value, if the variant is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self { TomlValue::String(val) => Some(val), _ => None }
    }

    /// Returns the boolean value, if the variant is a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match *self { TomlValue::Boolean(val) => Some(val), _ => None }
    }

    /// Returns the integer value, if the variant is an integer value.
    pub fn as_integer(&self) -> Option<i64> {
        match *self { TomlValue::Integer(val) => Some(val), _ => None }
    }

    /// Returns the float value, if the variant is a float value.
    pub fn as_float(&self) -> Option<f64> {
        match *self { TomlValue::Float(ref val) => Some(val.value), _ => None }
    }

    /// Returns the date-time value, if the variant is a date-time value including
    /// timezone offset.
    pub fn as_offset_datetime(&self) -> Option<&DateTime<FixedOffset>> {
        match *self { TomlValue::OffsetDateTime(ref val, _) => Some(val), _ => None }
    }

    /// Returns the date-time value, if the variant is a local date-time value.
    pub fn as_local_datetime(&self) -> Option<&NaiveDateTime> {
        match *self { TomlValue::LocalDateTime(ref val, _) => Some(val), _ => None }
    }

    /// Returns the date value, if the variant is a local date value.
    pub fn as_local_date(&self) -> Option<&NaiveDate> {
        match *self { TomlValue::LocalDate(ref val) => Some(val), _ => None }
    }

    /// Returns the time value, if the variant is a local time value.
    pub fn as_local_time(&self) -> Option<&NaiveTime> {
        match *self { TomlValue::LocalTime(ref val, _) => Some(val), _ => None }
    }

    /// Returns the table value, if the variant is a table value.
    pub fn as_table(&self) -> Option<&TomlTable> {
        match *self { TomlValue::Table(ref val) => Some(val), _ => None }
    }

    /// Returns the array value, if the variant is an array value.
    pub fn as_array(&self) -> Option<&[TomlValue]> {
        match *self { TomlValue::Array(ref val) => Some(&**val), _ => None }
    }
}
impl fmt::Display for TomlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TomlValue::String(s) => write!(f, "{}", json::json_string(s)),
            TomlValue::Boolean(val) => write!(f, "{}", val),
            TomlValue::Integer(val) => write!(f, "{}", val),
            TomlValue::Float(val) => write!(f, "{}", json::format_float(val)),
            TomlValue::OffsetDateTime(val, fmt_str) => write!(f, "{}", val.format(fmt_str)),
            TomlValue::LocalDateTime(val, fmt_str) => write!(f, "{}", val.format(fmt_str)),
            TomlValue::LocalDate(val) => write!(f, "{}", val.format("%Y-%m-%d")),
            TomlValue::LocalTime(val, fmt_str) => write!(f, "{}", val.format(fmt_str)),
            TomlValue::Array(a) => {
                write!(f, "[")?;
                for (i, v) in a.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", v)?;
                }
                write!(f, "]")
            },
            TomlValue::Table(t) => {
                write!(f, "{{")?;
                for (i, (k, node)) in t.iter().enumerate() {
                    if i > 0 { write!(f, ",")?; }
                    write!(f, " {} = {}", k, node)?;
                }
                write!(f, " }}")
            }
        }
    }
}

/// TOML key.
/// Keys are on the left hand side of a key-value pair definition, the central building block of
/// TOML.
/// Simple keys are in TOML terms bare or quoted keys.
/// Dotted keys are a sequence of bare or quoted keys, joined with a dot.
#[derive (Clone, Debug, Eq, PartialEq, Hash)]
pub struct TomlKey {
    // all parts of the key, separated by dots. Guaranteed minimum size is 1 element except for
    // the artificial root key.
    parts: Vec<String>,
    // the line number in the TOML source file
    line_nr: usize,
}
impl TomlKey {
    /// Creates a TOML key.
    /// This function works for all types of TOML keys.
    ///
    /// # Arguments
    /// * `parts` - the key as a vector with all its parts, quotes already removed
    /// * `line_nr` - the line number in the TOML source file
    pub fn from_parts(parts: Vec<String>, line_nr: usize) -> TomlKey {
        TomlKey { parts, line_nr }
    }

    /// Returns the line number in the source file, where this key is specified.
    #[inline]
    pub fn line_nr(&self) -> usize { self.line_nr }

    /// Returns the key's main part.
    /// Corresponds to entire string in case of simple keys and to the last part
    /// (i.e. the part after the rightmost dot) for dotted keys
    pub(crate) fn main_part(&self) -> &str {
        &self.parts[self.parts.len() - 1]
    }

    /// Returns the key's prefix part(s).
    /// Corresponds to empty slice in case of simple keys and to the part to the left of the
    /// rightmost dot for dotted keys
    pub(crate) fn prefix(&self) -> Vec<&str> {
        self.parts[0 .. self.parts.len() - 1].iter().map(|p| p.as_ref()).collect::<Vec<&str>>()
    }

    /// Returns all key parts, i.e. all items separated by dots.
    pub(crate) fn all_parts(&self) -> Vec<&str> {
        self.parts.iter().map(|p| p.as_ref()).collect::<Vec<&str>>()
    }

    /// Returns the full key name as a dotted string.
    pub fn full_name(&self) -> String {
        let mut name = String::with_capacity(64);
        for (i, p) in self.parts.iter().enumerate() {
            if p.is_empty() || p.contains('.') || p.contains(' ') {
                name.push('"');
                name.push_str(p);
                name.push('"');
            } else {
                name.push_str(p);
            }
            if i < self.parts.len() - 1 { name.push('.'); }
        }
        name
    }
}
impl fmt::Display for TomlKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> TomlLimits { TomlLimits::default() }

    fn key(parts: &[&str]) -> TomlKey {
        TomlKey::from_parts(parts.iter().map(|p| p.to_string()).collect(), 1)
    }

    /// The complete redefinition table, row by row.
    #[test]
    fn redefinition_rules() {
        use KeyKind::*;
        let allowed = |e: KeyKind, r: KeyKind| {
            ! matches!(redefinition(e, r), Redefinition::Conflict(_))
        };
        // existing Key
        assert!(allowed(Key, Key));
        assert!(allowed(Key, Table));
        assert!(! allowed(Key, KeyLeaf));
        assert!(! allowed(Key, TableLeaf));
        assert!(! allowed(Key, ArrayTable));
        // existing Table
        assert!(allowed(Table, Key));
        assert!(allowed(Table, Table));
        assert!(! allowed(Table, KeyLeaf));
        assert_eq!(Redefinition::MorphToTableLeaf, redefinition(Table, TableLeaf));
        assert!(! allowed(Table, ArrayTable));
        // existing KeyLeaf denies everything
        assert!(! allowed(KeyLeaf, Key));
        assert!(! allowed(KeyLeaf, Table));
        assert!(! allowed(KeyLeaf, KeyLeaf));
        assert!(! allowed(KeyLeaf, TableLeaf));
        assert!(! allowed(KeyLeaf, ArrayTable));
        // existing TableLeaf
        assert!(allowed(TableLeaf, Key));
        assert!(allowed(TableLeaf, Table));
        assert!(! allowed(TableLeaf, KeyLeaf));
        assert!(! allowed(TableLeaf, TableLeaf));
        assert!(! allowed(TableLeaf, ArrayTable));
        // existing ArrayTable
        assert!(! allowed(ArrayTable, Key));
        assert!(allowed(ArrayTable, Table));
        assert!(! allowed(ArrayTable, KeyLeaf));
        assert!(! allowed(ArrayTable, TableLeaf));
        assert_eq!(Redefinition::AppendEntry, redefinition(ArrayTable, ArrayTable));
    }

    #[test]
    fn table_morph_happens_once() {
        let mut root = TomlNode::table_root();
        // [a.b] introduces a as Table
        root.add_subkey("a", KeyKind::Table, &limits()).unwrap();
        // [a] morphs the node to TableLeaf
        let node = root.add_subkey("a", KeyKind::TableLeaf, &limits()).unwrap();
        assert_eq!(KeyKind::TableLeaf, node.kind());
        // a second [a] is a duplicate table
        let ex = root.add_subkey("a", KeyKind::TableLeaf, &limits()).unwrap_err();
        assert_eq!(E_TOML_TABLE_REDEFINED, ex.id());
    }

    #[test]
    fn key_leaf_is_locked() {
        let mut root = TomlNode::table_root();
        root.insert_pair(&key(&["a"]), TomlValue::Integer(1), &limits()).unwrap();
        let ex = root.insert_pair(&key(&["a"]), TomlValue::Integer(2),
                                  &limits()).unwrap_err();
        assert_eq!(E_TOML_KEY_ALREADY_IN_USE, ex.id());
        let ex = root.insert_pair(&key(&["a", "b"]), TomlValue::Integer(2),
                                  &limits()).unwrap_err();
        assert_eq!(E_TOML_KEY_ALREADY_IN_USE, ex.id());
        let ex = root.add_subkey("a", KeyKind::TableLeaf, &limits()).unwrap_err();
        assert_eq!(E_TOML_KEY_ALREADY_IN_USE, ex.id());
    }

    #[test]
    fn dotted_keys_share_intermediates() {
        let mut root = TomlNode::table_root();
        root.insert_pair(&key(&["a", "b"]), TomlValue::Integer(1), &limits()).unwrap();
        root.insert_pair(&key(&["a", "c"]), TomlValue::Integer(2), &limits()).unwrap();
        let a = root.get_key("a").unwrap();
        assert_eq!(KeyKind::Key, a.kind());
        assert_eq!(2, a.child_items().count());
        assert_eq!(Some(1), a.get_key("b").unwrap().value().unwrap().as_integer());
        assert_eq!(Some(2), a.get_key("c").unwrap().value().unwrap().as_integer());
    }

    #[test]
    fn array_table_entries() {
        let mut root = TomlNode::table_root();
        // [[t]] twice, values attach to the current entry
        let node = root.add_subkey("t", KeyKind::ArrayTable, &limits()).unwrap();
        node.insert_pair(&key(&["x"]), TomlValue::Integer(1), &limits()).unwrap();
        let node = root.add_subkey("t", KeyKind::ArrayTable, &limits()).unwrap();
        node.insert_pair(&key(&["x"]), TomlValue::Integer(2), &limits()).unwrap();
        let t = root.get_key("t").unwrap();
        assert_eq!(KeyKind::ArrayTable, t.kind());
        match t.value().unwrap() {
            TomlValue::Array(entries) => {
                assert_eq!(2, entries.len());
                for (i, e) in entries.iter().enumerate() {
                    match e {
                        TomlValue::Table(tab) => {
                            let x = tab.get("x").unwrap();
                            assert_eq!(Some(i as i64 + 1), x.value().unwrap().as_integer());
                        },
                        _ => panic!("entry is not a table")
                    }
                }
            },
            _ => panic!("array of tables holds no array")
        }
        // reads through the node reach the current entry
        assert_eq!(Some(2), t.get_key("x").unwrap().value().unwrap().as_integer());
    }

    #[test]
    fn subtable_under_array_table() {
        let mut root = TomlNode::table_root();
        // [[t]], then [t.sub]: the subtable attaches to the current entry
        root.add_subkey("t", KeyKind::ArrayTable, &limits()).unwrap();
        let t = root.add_subkey("t", KeyKind::Table, &limits()).unwrap();
        assert_eq!(KeyKind::ArrayTable, t.kind());
        let sub = t.add_subkey("sub", KeyKind::TableLeaf, &limits()).unwrap();
        sub.insert_pair(&key(&["x"]), TomlValue::Integer(1), &limits()).unwrap();
        // second entry has no subtable
        root.add_subkey("t", KeyKind::ArrayTable, &limits()).unwrap();
        let t = root.get_key("t").unwrap();
        assert!(t.get_key("sub").is_none());
        match t.value().unwrap() {
            TomlValue::Array(entries) => {
                match &entries[0] {
                    TomlValue::Table(tab) => assert!(tab.contains_key("sub")),
                    _ => panic!("entry is not a table")
                }
            },
            _ => panic!("array of tables holds no array")
        }
    }

    #[test]
    fn array_table_conflicts() {
        let mut root = TomlNode::table_root();
        root.add_subkey("t", KeyKind::ArrayTable, &limits()).unwrap();
        // [t] after [[t]]
        let ex = root.add_subkey("t", KeyKind::TableLeaf, &limits()).unwrap_err();
        assert_eq!(E_TOML_ARRAY_OF_TABLES_REDEFINED, ex.id());
        // [[u]] after [u]
        root.add_subkey("u", KeyKind::TableLeaf, &limits()).unwrap();
        let ex = root.add_subkey("u", KeyKind::ArrayTable, &limits()).unwrap_err();
        assert_eq!(E_TOML_NOT_AN_ARRAY_OF_TABLES, ex.id());
    }

    #[test]
    fn subkey_limit() {
        let mut caps = TomlLimits::default();
        caps.max_subkeys = 2;
        let mut root = TomlNode::table_root();
        root.insert_pair(&key(&["a"]), TomlValue::Integer(1), &caps).unwrap();
        root.insert_pair(&key(&["b"]), TomlValue::Integer(2), &caps).unwrap();
        let ex = root.insert_pair(&key(&["c"]), TomlValue::Integer(3), &caps).unwrap_err();
        assert_eq!(E_TOML_TOO_MANY_SUBKEYS, ex.id());
    }

    #[test]
    fn typed_accessors() {
        assert_eq!(Some("x"), TomlValue::String(String::from("x")).as_str());
        assert_eq!(None, TomlValue::Integer(1).as_str());
        assert_eq!(Some(true), TomlValue::Boolean(true).as_bool());
        assert_eq!(Some(1), TomlValue::Integer(1).as_integer());
        assert_eq!(None, TomlValue::Float(TomlFloat { value: 1.0, precision: 1,
                                                      scientific: false }).as_integer());
        assert_eq!(Some(1.5), TomlValue::Float(TomlFloat { value: 1.5, precision: 1,
                                                           scientific: false }).as_float());
        assert!(TomlValue::Array(Vec::new()).as_array().is_some());
        assert!(TomlValue::Table(TomlTable::new()).as_table().is_some());
    }

    #[test]
    fn key_names() {
        let k = key(&["a", "b c", "d"]);
        assert_eq!("a", k.prefix()[0]);
        assert_eq!("b c", k.prefix()[1]);
        assert_eq!("d", k.main_part());
        assert_eq!("a.\"b c\".d", k.full_name());
    }
}

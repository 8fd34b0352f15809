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

//! Tomlcore is a parser and in-memory model for TOML v1.0.0 documents.
//! A document read from a file, a stream or a string is turned into a typed tree of key nodes.
//! The tree offers lookup of values by key, typed accessors for all TOML value kinds and a
//! canonical typed-JSON serialization suitable for cross-implementation conformance testing.
//! Documents can also be constructed programmatically through the builder interface; built and
//! parsed documents share the same tree model and serialize identically.
//! Parsing stops at the first error encountered, the error carries the line and column in the
//! source and a short description. Structural limits like maximum input size or key length are
//! configurable per call.

#[macro_use]
extern crate lazy_static;

mod builder;
pub mod document;
pub mod errorhandling;
pub mod limits;
mod parser;
mod scanner;

use std::fs;
use std::io::{self, Read};
use errorhandling::*;
use parser::TomlParser;

pub use document::{KeyKind, TomlDocument, TomlFloat, TomlKey, TomlNode, TomlTable, TomlValue};
pub use errorhandling::TomlException;
pub use limits::TomlLimits;

/// Result type used throughout the library for error handling
pub type TomlResult<T> = Result<T, TomlException>;

// origin identifiers used in diagnostics for non-file input
const ORIGIN_STRING: &str = "<string>";
const ORIGIN_STREAM: &str = "<stream>";

/// Parses the specified TOML file using default limits.
/// The parsing process quits as soon as the first error is encountered.
///
/// # Arguments
/// * `file_name` - the name of the TOML file
///
/// # Return values
/// A TOML document structure with all TOML definitions parsed
///
/// # Errors
/// Returns a structure containing error information, if the file can't be read or parsed
pub fn parse_file(file_name: &str) -> TomlResult<TomlDocument> {
    parse_file_with_limits(file_name, TomlLimits::default())
}

/// Parses the specified TOML file.
/// The parsing process quits as soon as the first error is encountered.
///
/// # Arguments
/// * `file_name` - the name of the TOML file
/// * `limits` - the structural limits to apply
///
/// # Return values
/// A TOML document structure with all TOML definitions parsed
///
/// # Errors
/// Returns a structure containing error information, if the file can't be read or parsed
pub fn parse_file_with_limits(file_name: &str, limits: TomlLimits) -> TomlResult<TomlDocument> {
    // read file contents into memory
    let raw = match fs::read(file_name) {
        Ok(data) => data,
        Err(error) => {
            if error.kind() == io::ErrorKind::NotFound {
                return Err(tomlxe!(E_FILE_NOT_FOUND, file_name.to_string()))
            }
            return Err(tomlxe!(E_FILE_READ_ERR, file_name.to_string(), format!("{}", error)))
        }
    };
    parse_input(&raw, file_name, limits)
}

/// Parses TOML data from the specified stream using default limits.
/// The stream is read to its end before parsing starts.
///
/// # Arguments
/// * `stream` - the stream delivering the TOML formatted data
///
/// # Return values
/// A TOML document structure with all TOML definitions parsed
///
/// # Errors
/// Returns a structure containing error information, if the stream can't be read or its
/// contents can't be parsed
pub fn parse_stream<R: Read>(stream: &mut R) -> TomlResult<TomlDocument> {
    parse_stream_with_limits(stream, TomlLimits::default())
}

/// Parses TOML data from the specified stream.
/// The stream is read to its end before parsing starts.
///
/// # Arguments
/// * `stream` - the stream delivering the TOML formatted data
/// * `limits` - the structural limits to apply
///
/// # Return values
/// A TOML document structure with all TOML definitions parsed
///
/// # Errors
/// Returns a structure containing error information, if the stream can't be read or its
/// contents can't be parsed
pub fn parse_stream_with_limits<R: Read>(stream: &mut R,
                                         limits: TomlLimits) -> TomlResult<TomlDocument> {
    let mut raw = Vec::<u8>::new();
    // read one byte past the limit, so an oversized stream is detected without draining it
    let mut bounded = stream.take(limits.max_input_size as u64 + 1);
    if let Err(error) = bounded.read_to_end(&mut raw) {
        return Err(tomlxe!(E_FILE_READ_ERR, ORIGIN_STREAM.to_string(), format!("{}", error)))
    }
    parse_input(&raw, ORIGIN_STREAM, limits)
}

/// Parses the specified TOML string using default limits.
///
/// # Arguments
/// * `data` - the TOML formatted string
///
/// # Return values
/// A TOML document structure with all TOML definitions parsed
///
/// # Errors
/// Returns a structure containing error information, if the string can't be parsed
pub fn parse_str(data: &str) -> TomlResult<TomlDocument> {
    parse_str_with_limits(data, TomlLimits::default())
}

/// Parses the specified TOML string.
///
/// # Arguments
/// * `data` - the TOML formatted string
/// * `limits` - the structural limits to apply
///
/// # Return values
/// A TOML document structure with all TOML definitions parsed
///
/// # Errors
/// Returns a structure containing error information, if the string can't be parsed
pub fn parse_str_with_limits(data: &str, limits: TomlLimits) -> TomlResult<TomlDocument> {
    parse_input(data.as_bytes(), ORIGIN_STRING, limits)
}

/// Parses TOML data loaded into memory.
/// Validates input size, line count and UTF-8 encoding before the parser runs.
///
/// # Arguments
/// * `raw` - the raw input bytes
/// * `origin` - the input origin for diagnostics, file name or pseudo identifier
/// * `limits` - the structural limits to apply
///
/// # Errors
/// Returns a structure containing error information, if a limit is exceeded or the data can't
/// be parsed
fn parse_input(raw: &[u8], origin: &str, limits: TomlLimits) -> TomlResult<TomlDocument> {
    if raw.len() > limits.max_input_size {
        return Err(tomlxe!(E_TOML_INPUT_TOO_LARGE, origin.to_string(),
                           raw.len().to_string(), limits.max_input_size.to_string()))
    }
    let line_count = raw.iter().filter(|b| **b == b'\n').count();
    if line_count > limits.max_lines {
        return Err(tomlxe!(E_TOML_TOO_MANY_LINES, origin.to_string(),
                           limits.max_lines.to_string()))
    }
    let data = match std::str::from_utf8(raw) {
        Ok(s) => s,
        Err(_) => return Err(tomlxe!(E_TOML_INVALID_UTF8, origin.to_string()))
    };
    match TomlParser::new(data, limits).parse() {
        Ok(document) => Ok(document),
        Err(ex) => {
            let mut parse_ex = tomlxe!(E_TOML_PARSE_FAILED, origin.to_string());
            parse_ex.set_cause(ex);
            Err(parse_ex)
        }
    }
}

/// Encloses a string in double quotes, if it doesn't start already with double quotes.
///
/// # Arguments
/// * `s` - the string
///
/// # Return values
/// The string enclosed within double quotes
pub(crate) fn quoted(s: &str) -> String {
    if s.starts_with('"') { return s.to_string() }
    let mut quoted_val = String::with_capacity(s.len() + 2);
    quoted_val.push('"');
    quoted_val.push_str(s);
    quoted_val.push('"');
    quoted_val
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Parses a document and returns the cause of the parse failure.
    fn parse_error(data: &str) -> TomlException {
        match parse_str(data) {
            Ok(_) => panic!("document accepted: {}", data),
            Err(ex) => {
                assert_eq!(E_TOML_PARSE_FAILED, ex.id());
                // the interesting part is the cause recorded by the parser
                match ex.cause() {
                    Some(cause) => cause.clone(),
                    None => panic!("no cause recorded for: {}", data)
                }
            }
        }
    }

    #[test]
    fn simple_string_assignment() {
        let doc = parse_str("title = \"TOML Example\"\n").unwrap();
        let title = doc.get_key("title").unwrap();
        assert_eq!(KeyKind::KeyLeaf, title.kind());
        assert_eq!(Some("TOML Example"), title.value().unwrap().as_str());
        assert_eq!("{\"title\": {\"type\": \"string\", \"value\": \"TOML Example\"}}",
                   doc.to_json());
    }

    #[test]
    fn integers_in_all_bases() {
        let doc = parse_str("x = 0x1F\ny = 1_000\no = 0o755\nb = 0b101\nn = -17\n").unwrap();
        assert_eq!(Some(31), doc.get_key("x").unwrap().value().unwrap().as_integer());
        assert_eq!(Some(1000), doc.get_key("y").unwrap().value().unwrap().as_integer());
        assert_eq!(Some(493), doc.get_key("o").unwrap().value().unwrap().as_integer());
        assert_eq!(Some(5), doc.get_key("b").unwrap().value().unwrap().as_integer());
        assert_eq!(Some(-17), doc.get_key("n").unwrap().value().unwrap().as_integer());
    }

    #[test]
    fn float_serialization_fidelity() {
        let doc = parse_str("f = 3.14\ng = 5e2\n").unwrap();
        assert_eq!(concat!(
            "{\"f\": {\"type\": \"float\", \"value\": \"3.14\"}, ",
            "\"g\": {\"type\": \"float\", \"value\": \"5e+02\"}}"),
            doc.to_json());
    }

    #[test]
    fn special_floats() {
        let doc = parse_str("a = inf\nb = -inf\nc = nan\nd = 0.0\n").unwrap();
        assert_eq!(concat!(
            "{\"a\": {\"type\": \"float\", \"value\": \"inf\"}, ",
            "\"b\": {\"type\": \"float\", \"value\": \"-inf\"}, ",
            "\"c\": {\"type\": \"float\", \"value\": \"nan\"}, ",
            "\"d\": {\"type\": \"float\", \"value\": \"0.0\"}}"),
            doc.to_json());
    }

    #[test]
    fn offset_datetime_round_trip() {
        let doc = parse_str("dt = 1979-05-27T07:32:00-08:00\n").unwrap();
        let dt = doc.get_key("dt").unwrap().value().unwrap();
        assert!(dt.as_offset_datetime().is_some());
        assert_eq!(
            "{\"dt\": {\"type\": \"datetime\", \"value\": \"1979-05-27T07:32:00-08:00\"}}",
            doc.to_json());
    }

    #[test]
    fn datetime_kinds() {
        let doc = parse_str(concat!(
            "odt = 1979-05-27T07:32:00Z\n",
            "ldt = 1979-05-27T07:32:00\n",
            "ld = 1979-05-27\n",
            "lt = 07:32:00.5\n")).unwrap();
        assert_eq!(concat!(
            "{\"ld\": {\"type\": \"date-local\", \"value\": \"1979-05-27\"}, ",
            "\"ldt\": {\"type\": \"datetime-local\", \"value\": \"1979-05-27T07:32:00\"}, ",
            "\"lt\": {\"type\": \"time-local\", \"value\": \"07:32:00.500\"}, ",
            "\"odt\": {\"type\": \"datetime\", \"value\": \"1979-05-27T07:32:00Z\"}}"),
            doc.to_json());
    }

    #[test]
    fn datetime_space_delimiter_and_lowercase() {
        let doc = parse_str("a = 1979-05-27 07:32:00\nb = 1979-05-27t07:32:00z\n").unwrap();
        assert_eq!(concat!(
            "{\"a\": {\"type\": \"datetime-local\", \"value\": \"1979-05-27 07:32:00\"}, ",
            "\"b\": {\"type\": \"datetime\", \"value\": \"1979-05-27t07:32:00z\"}}"),
            doc.to_json());
    }

    #[test]
    fn booleans() {
        let doc = parse_str("t = true\nf = false\n").unwrap();
        assert_eq!(Some(true), doc.get_key("t").unwrap().value().unwrap().as_bool());
        assert_eq!(Some(false), doc.get_key("f").unwrap().value().unwrap().as_bool());
    }

    #[test]
    fn arrays() {
        let doc = parse_str("a = [1, \"two\", [3.5], { x = 1 }]\n").unwrap();
        assert_eq!(concat!(
            "{\"a\": [{\"type\": \"integer\", \"value\": \"1\"}, ",
            "{\"type\": \"string\", \"value\": \"two\"}, ",
            "[{\"type\": \"float\", \"value\": \"3.5\"}], ",
            "{\"x\": {\"type\": \"integer\", \"value\": \"1\"}}]}"),
            doc.to_json());
    }

    #[test]
    fn arrays_span_lines() {
        let doc = parse_str("a = [\n  1, # first\n  2,\n]\n").unwrap();
        let a = doc.get_key("a").unwrap().value().unwrap();
        assert_eq!(2, a.as_array().unwrap().len());
    }

    #[test]
    fn tables_and_dotted_keys() {
        let doc = parse_str(concat!(
            "[owner]\n",
            "name = \"Tom\"\n",
            "dob.year = 1979\n",
            "[owner.address]\n",
            "city = \"Berlin\"\n")).unwrap();
        let owner = doc.get_key("owner").unwrap();
        assert_eq!(KeyKind::TableLeaf, owner.kind());
        assert_eq!(Some("Tom"), owner.get_key("name").unwrap().value().unwrap().as_str());
        let dob = owner.get_key("dob").unwrap();
        assert_eq!(Some(1979), dob.get_key("year").unwrap().value().unwrap().as_integer());
        let addr = owner.get_key("address").unwrap();
        assert_eq!(Some("Berlin"), addr.get_key("city").unwrap().value().unwrap().as_str());
    }

    #[test]
    fn array_of_tables() {
        let doc = parse_str("[[t]]\nx = 1\n[[t]]\nx = 2\n").unwrap();
        let t = doc.get_key("t").unwrap();
        assert_eq!(KeyKind::ArrayTable, t.kind());
        match t.value().unwrap() {
            TomlValue::Array(entries) => assert_eq!(2, entries.len()),
            _ => panic!("array of tables holds no array")
        }
        assert_eq!(concat!(
            "{\"t\": [{\"x\": {\"type\": \"integer\", \"value\": \"1\"}}, ",
            "{\"x\": {\"type\": \"integer\", \"value\": \"2\"}}]}"),
            doc.to_json());
    }

    #[test]
    fn subtables_attach_to_current_entry() {
        let doc = parse_str(concat!(
            "[[fruit]]\n",
            "name = \"apple\"\n",
            "[fruit.physical]\n",
            "color = \"red\"\n",
            "[[fruit]]\n",
            "name = \"banana\"\n")).unwrap();
        assert_eq!(concat!(
            "{\"fruit\": [",
            "{\"name\": {\"type\": \"string\", \"value\": \"apple\"}, ",
            "\"physical\": {\"color\": {\"type\": \"string\", \"value\": \"red\"}}}, ",
            "{\"name\": {\"type\": \"string\", \"value\": \"banana\"}}]}"),
            doc.to_json());
    }

    #[test]
    fn inline_tables() {
        let doc = parse_str("point = { x = 1, y = 2 }\n").unwrap();
        assert_eq!(concat!(
            "{\"point\": {\"x\": {\"type\": \"integer\", \"value\": \"1\"}, ",
            "\"y\": {\"type\": \"integer\", \"value\": \"2\"}}}"),
            doc.to_json());
        // an inline table is closed, later extension is rejected
        let ex = parse_error("p = { x = 1 }\np.y = 2\n");
        assert_eq!(E_TOML_KEY_ALREADY_IN_USE, ex.id());
    }

    #[test]
    fn strings_with_escapes() {
        let doc = parse_str("s = \"col1\\tcol2\\n\\u00E9\"\n").unwrap();
        assert_eq!(Some("col1\tcol2\n\u{e9}"),
                   doc.get_key("s").unwrap().value().unwrap().as_str());
        assert_eq!("{\"s\": {\"type\": \"string\", \"value\": \"col1\\tcol2\\n\u{e9}\"}}",
                   doc.to_json());
    }

    #[test]
    fn multiline_strings() {
        let doc = parse_str(concat!(
            "a = \"\"\"\nline1\nline2\"\"\"\n",
            "b = '''literal ''quote'''\n")).unwrap();
        assert_eq!(Some("line1\nline2"), doc.get_key("a").unwrap().value().unwrap().as_str());
        assert_eq!(Some("literal ''quote"),
                   doc.get_key("b").unwrap().value().unwrap().as_str());
    }

    #[test]
    fn empty_document() {
        let doc = parse_str("").unwrap();
        assert_eq!(0, doc.root_items().count());
        assert_eq!("{}", doc.to_json());
    }

    #[test]
    fn boundary_line_handling() {
        // last line without trailing newline
        let doc = parse_str("x = 1").unwrap();
        assert_eq!(Some(1), doc.get_key("x").unwrap().value().unwrap().as_integer());
        // comment ending at end of input
        let doc = parse_str("x = 1\n# trailing comment").unwrap();
        assert_eq!(1, doc.root_items().count());
        // comment only document
        let doc = parse_str("# nothing here").unwrap();
        assert_eq!(0, doc.root_items().count());
    }

    #[test]
    fn redefinition_rejected_with_line_number() {
        let cause = parse_error("a.b = 1\n[a]\n");
        // the cause names the offending line and key
        assert_eq!(E_TOML_KEY_ALREADY_IN_USE, cause.id());
        let args = cause.args().as_ref().unwrap().clone();
        assert_eq!("2", args[0]);
        assert_eq!("\"a\"", args[1]);
    }

    #[test]
    fn duplicate_keys_rejected() {
        assert!(parse_str("a = 1\na = 2\n").is_err());
        assert!(parse_str("[t]\n[t]\n").is_err());
        assert!(parse_str("[[t]]\n[t]\n").is_err());
        assert!(parse_str("[t]\n[[t]]\n").is_err());
        assert!(parse_str("a = 1\n[a.b]\n").is_err());
    }

    #[test]
    fn supertable_definition_after_subtable() {
        // [a.b] then [a] is legal, a second [a] is not
        let doc = parse_str("[a.b]\nx = 1\n[a]\ny = 2\n").unwrap();
        let a = doc.get_key("a").unwrap();
        assert_eq!(KeyKind::TableLeaf, a.kind());
        assert_eq!(Some(2), a.get_key("y").unwrap().value().unwrap().as_integer());
        assert!(parse_str("[a.b]\n[a]\n[a]\n").is_err());
    }

    #[test]
    fn grammar_errors() {
        assert!(parse_str("x 1\n").is_err());
        assert!(parse_str("x =\n").is_err());
        assert!(parse_str("[t\n").is_err());
        assert!(parse_str("[[t]\n").is_err());
        assert!(parse_str("x = [1 2]\n").is_err());
        assert!(parse_str("x = { a = 1, }\n").is_err());
        assert!(parse_str("x = { a = 1\n}\n").is_err());
        assert!(parse_str("x = 1 y = 2\n").is_err());
        assert!(parse_str("[t] x = 1\n").is_err());
    }

    #[test]
    fn input_size_limit() {
        let mut limits = TomlLimits::default();
        limits.max_input_size = 10;
        // exactly at the limit
        assert!(parse_str_with_limits("x = 12345\n", limits).is_ok());
        // one byte more
        let ex = parse_str_with_limits("x = 123456\n", limits).unwrap_err();
        assert_eq!(E_TOML_INPUT_TOO_LARGE, ex.id());
    }

    #[test]
    fn line_count_limit() {
        let mut limits = TomlLimits::default();
        limits.max_lines = 2;
        assert!(parse_str_with_limits("a = 1\nb = 2\n", limits).is_ok());
        let ex = parse_str_with_limits("a = 1\nb = 2\nc = 3\n", limits).unwrap_err();
        assert_eq!(E_TOML_TOO_MANY_LINES, ex.id());
    }

    #[test]
    fn array_length_limit() {
        let mut limits = TomlLimits::default();
        limits.max_array_len = 3;
        assert!(parse_str_with_limits("a = [1, 2, 3]\n", limits).is_ok());
        assert!(parse_str_with_limits("a = [1, 2, 3, 4]\n", limits).is_err());
    }

    #[test]
    fn key_length_limit() {
        let mut limits = TomlLimits::default();
        limits.max_key_len = 4;
        assert!(parse_str_with_limits("abcd = 1\n", limits).is_ok());
        assert!(parse_str_with_limits("abcde = 1\n", limits).is_err());
    }

    #[test]
    fn stream_input() {
        let mut stream = Cursor::new(b"x = 1\n".to_vec());
        let doc = parse_stream(&mut stream).unwrap();
        assert_eq!(Some(1), doc.get_key("x").unwrap().value().unwrap().as_integer());
        // invalid UTF-8 is rejected before parsing
        let mut stream = Cursor::new(vec![0xffu8, 0xfe, 0x0a]);
        let ex = parse_stream(&mut stream).unwrap_err();
        assert_eq!(E_TOML_INVALID_UTF8, ex.id());
    }

    #[test]
    fn file_not_found() {
        let ex = parse_file("/nonexistent/path/config.toml").unwrap_err();
        assert_eq!(E_FILE_NOT_FOUND, ex.id());
    }

    #[test]
    fn parsing_is_deterministic() {
        let data = concat!(
            "title = \"t\"\n",
            "[owner]\nname = \"Tom\"\n",
            "[[jobs]]\nid = 1\n",
            "[[jobs]]\nid = 2\n");
        let doc1 = parse_str(data).unwrap();
        let doc2 = parse_str(data).unwrap();
        assert_eq!(doc1.to_json(), doc2.to_json());
        assert_eq!(doc1.root(), doc2.root());
    }

    #[test]
    fn reconstruction_round_trip() {
        // a document and its literal reconstruction serialize identically
        let doc1 = parse_str("[a]\nb = 1\nc = \"x\"\n").unwrap();
        let doc2 = parse_str("a.b = 1\na.c = \"x\"\n").unwrap();
        assert_eq!(doc1.to_json(), doc2.to_json());
    }

    #[test]
    fn quoted_keys() {
        let doc = parse_str("\"a.b\" = 1\n'c d' = 2\n").unwrap();
        assert_eq!(Some(1), doc.get_key("a.b").unwrap().value().unwrap().as_integer());
        assert_eq!(Some(2), doc.get_key("c d").unwrap().value().unwrap().as_integer());
    }

    #[test]
    fn get_key_on_root() {
        let doc = parse_str("x = 1\n").unwrap();
        // the anonymous root key matches the empty identifier
        assert!(doc.get_key("").is_some());
        assert!(doc.get_key("missing").is_none());
    }
}

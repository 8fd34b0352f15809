// ------------------------------------------------------------------------------------------------
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
// ------------------------------------------------------------------------------------------------

//! Tomlcore TOML parser.

use crate::document::{TomlDocument, TomlFloat, TomlKey, TomlNode, TomlValue};
use crate::errorhandling::*;
use crate::limits::TomlLimits;
use crate::quoted;
use crate::scanner::{TokenId, TokenValueType, TomlScanner};

/// TOML parser.
/// Builds a TOML document from a stream of tokens.
pub(crate) struct TomlParser {
    // Lexical analyzer
    scanner: TomlScanner,
    // Structural limits, applied to arrays here and passed on to the document
    limits: TomlLimits,
    // line number of most recent parsed key, used for error messages only
    key_line_nr: usize
}
impl TomlParser {
    /// Creates a parser for the given TOML string.
    ///
    /// # Arguments
    /// * `data` - the string containing the input data to parse
    /// * `limits` - the structural limits to apply
    pub(crate) fn new(data: &str, limits: TomlLimits) -> TomlParser {
        TomlParser {
            scanner: TomlScanner::new(data, limits),
            limits,
            key_line_nr: 1
        }
    }

    /// Parses a TOML formatted string.
    /// The parsing process quits as soon as the first error is encountered.
    ///
    /// # Return values
    /// A document structure with all TOML definitions parsed
    ///
    /// # Errors
    /// Returns a structure containing error information, if the string can't be parsed
    pub(crate) fn parse(&mut self) -> Result<TomlDocument, TomlException> {
        let mut document = TomlDocument::new(self.limits);
        loop {
            let token = self.scanner.next_token(true)?;
            match token {
                TokenId::LeftBracket => {
                    let key = self.table_header(TokenId::RightBracket)?;
                    if let Err(ex) = document.header_selected(&key, false) {
                        return Err(self.enhance_error(ex))
                    }
                },
                TokenId::DoubleLeftBracket => {
                    let key = self.table_header(TokenId::DoubleRightBracket)?;
                    if let Err(ex) = document.header_selected(&key, true) {
                        return Err(self.enhance_error(ex))
                    }
                },
                TokenId::Key => {
                    let kvp = self.key_value_pair(true)?;
                    if let Err(ex) = document.insert(&kvp.key, kvp.value) {
                        // key already exists or at least one ancestor key is not a table
                        return Err(self.enhance_error(ex))
                    }
                },
                TokenId::LineBreak => (),
                TokenId::EndOfInput => break,
                _ => return Err(self.token_pos_error(E_TOML_KEY_OR_TABLE_EXPECTED, true))
            }
        }
        Ok(document)
    }

    /// Parses a key-value pair (<key> = <value> [<linebreak>]).
    ///
    /// # Arguments
    /// * `lbreak_needed` - indicates whether a line break is needed after the key-value pair
    ///
    /// # Return values
    /// The parsed TOML key-value pair
    ///
    /// # Errors
    /// Returns a structure containing error information, if the definition does not conform to
    /// the TOML specification or key resp. a specific value is invalid
    fn key_value_pair(&mut self, lbreak_needed: bool) -> Result<TomlKeyValuePair, TomlException> {
        let key = self.key(TokenId::Equal)?;
        let value = self.value()?;
        if lbreak_needed {
            let token = self.scanner.next_token(true)?;
            if token != TokenId::LineBreak {
                return Err(self.key_line_error(E_TOML_NO_LINE_BREAK_AFTER_KVP, false))
            }
        }
        Ok(TomlKeyValuePair::new(key, value))
    }

    /// Parses the header of a table or an array of tables ([ <key> ] resp. [[ <key> ]]).
    ///
    /// # Arguments
    /// * `term_token` - the token terminating the header
    ///
    /// # Return values
    /// The parsed TOML key
    ///
    /// # Errors
    /// Returns a structure containing error information, if the definition does not conform to
    /// the TOML specification or the key is invalid
    fn table_header(&mut self, term_token: TokenId) -> Result<TomlKey, TomlException> {
        let token = self.scanner.next_token(true)?;
        if token != TokenId::Key {
            if token == TokenId::LeftBracket {
                return Err(self.token_pos_error(E_TOML_WS_BETWEEN_BRACKETS, true))
            }
            return Err(self.token_pos_error(E_TOML_KEY_EXPECTED, true))
        }
        let key = self.key(term_token)?;
        let token = self.scanner.next_token(true)?;
        if token != TokenId::LineBreak && token != TokenId::EndOfInput {
            return Err(self.token_pos_error(E_TOML_NO_LINE_BREAK_AFTER_HEADER, true))
        }
        Ok(key)
    }

    /// Parses an inline table ({ <key> = <value>, ... }).
    /// The last consumed token must be a left brace.
    /// The resulting table is closed, its container key is stored as a plain value and cannot
    /// be extended by later assignments.
    ///
    /// # Return values
    /// The parsed TOML table value
    ///
    /// # Errors
    /// Returns a structure containing error information, if the definition does not conform to
    /// the TOML specification or a specific value is invalid
    fn inline_table(&mut self) -> Result<TomlValue, TomlException> {
        let (start_line, start_col) = self.scanner.token_position();
        let mut sub_root = TomlNode::table_root();
        let mut last_token = TokenId::LineBreak;
        loop {
            let token = self.scanner.next_token(true)?;
            match token {
                TokenId::Key => {
                    if last_token == TokenId::Key {
                        return Err(self.token_pos_error(E_TOML_COMMA_EXPECTED, true))
                    }
                    let kvp = self.key_value_pair(false)?;
                    if let Err(ex) = sub_root.insert_pair(&kvp.key, kvp.value, &self.limits) {
                        return Err(self.enhance_error(ex))
                    }
                    last_token = token;
                },
                TokenId::Comma => {
                    match last_token {
                        TokenId::Comma => {
                            return Err(self.token_pos_error(E_TOML_DUP_SEP_TOKEN, false))
                        },
                        TokenId::LineBreak => {
                            return Err(self.token_pos_error(E_TOML_LEADING_SEP, false))
                        },
                        _ => ()
                    }
                    last_token = token;
                },
                TokenId::RightBrace => {
                    if last_token == TokenId::Comma {
                        return Err(self.token_pos_error(E_TOML_TRAILING_SEP, false))
                    }
                    break
                },
                TokenId::LineBreak | TokenId::EndOfInput => {
                    return Err(self.parser_error(E_TOML_UNTERM_INLINE_TABLE,
                                                 start_line, Some(start_col), None, false))
                },
               _ => {
                    if last_token == TokenId::Comma || last_token == TokenId::LineBreak {
                        return Err(self.token_pos_error(E_TOML_KEY_EXPECTED, true))
                    }
                    return Err(self.token_pos_error(E_TOML_COMMA_OR_RBRACE_EXPECTED, true))
                }
            }
        }
        Ok(TomlValue::Table(sub_root.into_children()))
    }

    /// Parses an array ([ <value>, ... ]).
    /// Last token consumed was left bracket.
    ///
    /// # Return values
    /// The parsed TOML array value
    ///
    /// # Errors
    /// Returns a structure containing error information, if the definition does not conform to
    /// the TOML specification or a specific value is invalid
    fn array(&mut self) -> Result<TomlValue, TomlException> {
        let (start_line, start_col) = self.scanner.token_position();
        let mut items = Vec::<TomlValue>::new();
        let mut last_token = TokenId::LineBreak;
        loop {
            let token = self.scanner.next_token(false)?;
            match token {
                TokenId::Value => {
                    if last_token != TokenId::Comma && last_token != TokenId::LineBreak {
                        return Err(self.token_pos_error(E_TOML_UNSEP_ARRAY_ITEMS, false))
                    }
                    last_token = token;
                    let val = self.token_value()?;
                    self.push_item(&mut items, val, start_line, start_col)?;
                },
                TokenId::Comma => {
                    match last_token {
                        TokenId::Comma => {
                            return Err(self.token_pos_error(E_TOML_DUP_SEP_TOKEN, false))
                        },
                        TokenId::LineBreak => {
                            return Err(self.token_pos_error(E_TOML_LEADING_SEP, false))
                        }
                        _ => ()
                    }
                    last_token = token;
                },
                TokenId::RightBracket => break,
                TokenId::LeftBracket => {
                    if last_token != TokenId::Comma && last_token != TokenId::LineBreak {
                        return Err(self.token_pos_error(E_TOML_UNSEP_ARRAY_ITEMS, false))
                    }
                    last_token = token;
                    let val = self.array()?;
                    self.push_item(&mut items, val, start_line, start_col)?;
                },
                TokenId::LeftBrace => {
                    if last_token != TokenId::Comma && last_token != TokenId::LineBreak {
                        return Err(self.token_pos_error(E_TOML_UNSEP_ARRAY_ITEMS, false))
                    }
                    last_token = token;
                    let val = self.inline_table()?;
                    self.push_item(&mut items, val, start_line, start_col)?;
                },
                TokenId::LineBreak => (),
                TokenId::EndOfInput => {
                    return Err(self.parser_error(E_TOML_UNTERM_ARRAY,
                                                 start_line, Some(start_col), None, false))
                },
                _ => return Err(self.token_pos_error(E_TOML_INV_ARRAY_TOKEN, true))
            }
        }
        Ok(TomlValue::Array(items))
    }

    /// Appends a value to an array under construction, observing the array length limit.
    ///
    /// # Arguments
    /// * `items` - the elements collected so far
    /// * `val` - the value to append
    /// * `start_line` - the line number where the array begins
    /// * `start_col` - the column number where the array begins
    ///
    /// # Errors
    /// Returns a structure containing error information, if the array exceeds the configured
    /// maximum length
    fn push_item(&mut self, items: &mut Vec<TomlValue>, val: TomlValue,
                 start_line: usize, start_col: usize) -> Result<(), TomlException> {
        if items.len() >= self.limits.max_array_len {
            return Err(self.parser_error(E_TOML_ARRAY_TOO_LARGE, start_line, Some(start_col),
                                         Some(&self.limits.max_array_len.to_string()), false))
        }
        items.push(val);
        Ok(())
    }

    /// Parses a TOML value, i.e. the right hand side of a key-value pair.
    /// The last token consumed must be the equal sign.
    ///
    /// # Return values
    /// The matching enum variant of the parsed TOML value
    ///
    /// # Errors
    /// Returns a structure containing error information, if the definition does not conform to
    /// the TOML specification or a specific value is invalid
    fn value(&mut self) -> Result<TomlValue, TomlException> {
        let token = self.scanner.next_token(false)?;
        match token {
            TokenId::Value => self.token_value(),
            TokenId::LeftBracket => self.array(),
            TokenId::LeftBrace => self.inline_table(),
            TokenId::Dot => Err(self.token_pos_error(E_TOML_INV_VALUE_START, true)),
            _ => Err(self.token_pos_error(E_TOML_VALUE_EXPECTED, true))
        }
    }

    /// Parses a key, simple or dotted.
    /// The token with the initial (or only) part of the key must have already been consumed.
    ///
    /// # Arguments
    /// * `sep_token` - the token that must follow the key
    ///
    /// # Return values
    /// The parsed TOML key
    ///
    /// # Errors
    /// Returns a structure containing error information, if the key does not conform to
    /// the TOML specification
    fn key(&mut self, sep_token: TokenId) -> Result<TomlKey, TomlException> {
        self.key_line_nr = self.scanner.token_position().0;
        let mut key_parts = vec!(self.scanner.token_value().to_string());
        let mut last_token = TokenId::Key;
        loop {
            let token = self.scanner.next_token(true)?;
            match token {
                TokenId::Dot => {
                    if last_token != TokenId::Key {
                        return Err(self.token_pos_error(E_TOML_TWO_DOTS_WITHIN_KEY, false))
                    }
                    last_token = token;
                },
                TokenId::Key => {
                    if last_token != TokenId::Dot {
                        return Err(self.token_pos_error(E_TOML_UNSEP_KEYPARTS, false))
                    }
                    last_token = token;
                    key_parts.push(self.scanner.token_value().to_string());
                },
                TokenId::Equal | TokenId::RightBracket | TokenId::DoubleRightBracket => {
                    if last_token != TokenId::Key {
                        return Err(self.token_pos_error(E_TOML_TRAILING_DOT_IN_KEY, false))
                    }
                    if token != sep_token {
                        return Err(self.parser_error(E_TOML_INV_KEY_TERM,
                                                     self.scanner.token_position().0, None,
                                                     Some(&sep_token.to_string()), true))
                    }
                    break
                },
                TokenId::LineBreak | TokenId::EndOfInput => {
                    if sep_token == TokenId::Equal {
                        return Err(self.key_line_error(E_TOML_EQUAL_EXPECTED, false))
                    }
                    return Err(self.key_line_error(E_TOML_CLOSING_BRACKET_EXPECTED, false))
                },
                _ => return Err(self.key_line_error(E_TOML_CLOSING_BRACKET_EXPECTED, false))
            }
        }
        Ok(TomlKey::from_parts(key_parts, self.key_line_nr))
    }

    /// Determines the variant and specific value of a simple TOML value.
    /// Float values keep their spelled precision and exponent notation, date-time values the
    /// format needed to re-serialize them exactly as spelled.
    ///
    /// # Return values
    /// The matching enum variant of a parsed simple TOML value
    ///
    /// # Errors
    /// Returns a structure containing error information, if the specific value is invalid
    fn token_value(&mut self) -> Result<TomlValue, TomlException> {
        match self.scanner.token_value_type() {
            TokenValueType::String => {
                Ok(TomlValue::String(self.scanner.token_value().to_string()))
            },
            TokenValueType::Boolean => {
                if let Ok(val) = self.scanner.bool_token_value() {
                    return Ok(TomlValue::Boolean(val))
                }
                Err(self.current_pos_error(E_TOML_INV_VALUE, true))
            },
            TokenValueType::Integer => {
                if let Ok(val) = self.scanner.int_token_value() {
                    return Ok(TomlValue::Integer(val))
                }
                Err(self.current_pos_error(E_TOML_INV_VALUE, true))
            },
            TokenValueType::Float => {
                if let Ok(val) = self.scanner.f64_token_value() {
                    return Ok(TomlValue::Float(float_repr(val, self.scanner.token_value())))
                }
                Err(self.current_pos_error(E_TOML_INV_VALUE, true))
            },
            TokenValueType::OffsetDateTime => {
                if let Ok(val) = self.scanner.offset_datetime_token_value() {
                    let fmt = render_format(self.scanner.token_value());
                    return Ok(TomlValue::OffsetDateTime(val, fmt))
                }
                Err(self.current_pos_error(E_TOML_INV_VALUE, true))
            },
            TokenValueType::LocalDateTime => {
                if let Ok(val) = self.scanner.local_datetime_token_value() {
                    let fmt = render_format(self.scanner.token_value());
                    return Ok(TomlValue::LocalDateTime(val, fmt))
                }
                Err(self.current_pos_error(E_TOML_INV_VALUE, true))
            },
            TokenValueType::LocalDate => {
                if let Ok(val) = self.scanner.local_date_token_value() {
                    return Ok(TomlValue::LocalDate(val))
                }
                Err(self.current_pos_error(E_TOML_INV_VALUE, true))
            },
            TokenValueType::LocalTime => {
                if let Ok(val) = self.scanner.local_time_token_value() {
                    let fmt = render_format(self.scanner.token_value());
                    return Ok(TomlValue::LocalTime(val, fmt))
                }
                Err(self.current_pos_error(E_TOML_INV_VALUE, true))
            }
        }
    }

    /// Creates an information structure in case of a parser error.
    /// Always inserts the specified line and - if specified - column number.
    /// Then follow parameter and the actual token value, if desired.
    ///
    /// # Arguments
    /// * `code` - the error code
    /// * `line_nr` - the line number in the input data, where the error occurred
    /// * `col_nr` - the optional column number within the error line
    /// * `param` - an optional parameter
    /// * `incl_token_val` - indicates whether to include the token value in the exception params
    ///
    /// # Return values
    /// a structure containing error information
    fn parser_error(&mut self, code: &'static str,
                    line_nr: usize, col_nr: Option<usize>,
                    param: Option<&str>, incl_token_val: bool) -> TomlException {
        let mut x_params = vec!(line_nr.to_string());
        if let Some(cnr) = col_nr { x_params.push(cnr.to_string()); }
        if let Some(p) = param { x_params.push(quoted(p)); }
        if incl_token_val { x_params.push(quoted(self.scanner.token_value())); }
        TomlException::with_args(code, &x_params)
    }

    /// Creates a structure in case of a scanner or parser error.
    /// Always inserts the line and column number of the last scanned character,
    /// then - if desired - the actual token value.
    ///
    /// # Arguments
    /// * `code` - the error code
    /// * `incl_token_val` - indicates whether to include the token value in the exception params
    ///
    /// # Return values
    /// a structure containing error information
    fn current_pos_error(&mut self, code: &'static str, incl_token_val: bool) -> TomlException {
        let (line, col) = self.scanner.current_position();
        self.parser_error(code, line, Some(col), None, incl_token_val)
    }

    /// Creates an information structure in case of a parser error.
    /// Always inserts the line and column number of the current token,
    /// then - if desired - the actual token value.
    ///
    /// # Arguments
    /// * `code` - the error code
    /// * `incl_token_val` - indicates whether to include the token value in the exception params
    ///
    /// # Return values
    /// a structure containing error information
    fn token_pos_error(&mut self, code: &'static str, incl_token_val: bool) -> TomlException {
        let (line, col) = self.scanner.token_position();
        self.parser_error(code, line, Some(col), None, incl_token_val)
    }

    /// Creates a structure in case of a scanner or parser error.
    /// Always inserts the line number of the last key as first argument,
    /// then - if desired - the actual token value.
    ///
    /// # Arguments
    /// * `code` - the error code
    /// * `incl_token_val` - indicates whether to include the token value in the exception params
    ///
    /// # Return values
    /// a structure containing error information
    fn key_line_error(&mut self, code: &'static str, incl_token_val: bool) -> TomlException {
        self.parser_error(code, self.key_line_nr, None, None, incl_token_val)
    }

    /// Inserts the line number into exceptions from TOML document manipulations, since
    /// a document has no relation to the TOML source.
    ///
    /// # Arguments
    /// * `ex` - the exception to enhance
    ///
    /// # Return values
    /// the exception with the line number prepended to the original exception arguments
    fn enhance_error(&self, mut ex: TomlException) -> TomlException {
        let mut ex_args = vec!(self.key_line_nr.to_string());
        if ex.has_args() { ex_args.extend_from_slice(ex.args().as_ref().unwrap()); }
        ex.replace_args(&ex_args);
        ex
    }
}

/// TOML key-value pair.
/// Key-value pairs are the central building block of TOML, key = value.
struct TomlKeyValuePair {
    key: TomlKey,
    value: TomlValue
}
impl TomlKeyValuePair {
    /// Creates a key-value pair.
    ///
    /// # Arguments
    /// * `key` - the TOML key
    /// * `value` - the TOML value
    fn new(key: TomlKey, value: TomlValue) -> TomlKeyValuePair {
        TomlKeyValuePair {key, value}
    }
}

/// Derives the presentation attributes of a float value from its spelling in the TOML source.
/// Precision is the number of digits after the decimal point, the scientific flag is set when
/// an exponent was spelled.
///
/// # Arguments
/// * `value` - the numeric value
/// * `spelling` - the token text, underscores already removed
fn float_repr(value: f64, spelling: &str) -> TomlFloat {
    if ! value.is_finite() {
        return TomlFloat { value, precision: 0, scientific: false }
    }
    let scientific = spelling.contains('e') || spelling.contains('E');
    let mantissa = spelling.split(|c| c == 'e' || c == 'E').next().unwrap_or("");
    let precision = match mantissa.find('.') {
        Some(pos) => mantissa.len() - pos - 1,
        None => 0
    };
    TomlFloat { value, precision, scientific }
}

/// Builds the format used to re-serialize a date-time value exactly as spelled.
/// The date-time delimiter, the normalized fractional second digits and the timezone offset
/// are embedded as literal text, so the format is self-contained.
///
/// # Arguments
/// * `val` - the scanned token text of the date-time value
fn render_format(val: &str) -> String {
    let chars: Vec<char> = val.chars().collect();
    let mut fmt = String::with_capacity(32);
    let mut pos = 0;
    if chars.len() > 4 && chars[4] == '-' {
        fmt.push_str("%Y-%m-%d");
        pos = 10;
        if pos < chars.len() {
            // delimiter between date and time as spelled: T, t or space
            fmt.push(chars[pos]);
            pos += 1;
        }
    }
    if pos < chars.len() {
        fmt.push_str("%H:%M:%S");
        pos += 8;
    }
    if pos < chars.len() && chars[pos] == '.' {
        fmt.push('.');
        pos += 1;
        let mut digits = String::new();
        while pos < chars.len() && chars[pos].is_ascii_digit() {
            digits.push(chars[pos]);
            pos += 1;
        }
        fmt.push_str(&normalized_fraction(&digits));
    }
    // remainder is the timezone offset as spelled: Z, z or [+|-]hh:mm
    while pos < chars.len() {
        fmt.push(chars[pos]);
        pos += 1;
    }
    fmt
}

/// Normalizes the digits of fractional seconds.
/// One digit is scaled to milliseconds by factor 100, two digits by factor 10, three or more
/// digits are kept, truncated to nanosecond precision.
///
/// # Arguments
/// * `digits` - the spelled digits of the fractional seconds
fn normalized_fraction(digits: &str) -> String {
    match digits.len() {
        0 => String::new(),
        1 => format!("{}00", digits),
        2 => format!("{}0", digits),
        len if len > 9 => digits[.. 9].to_string(),
        _ => digits.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_presentation() {
        let f = float_repr(3.14, "3.14");
        assert_eq!(2, f.precision);
        assert!(! f.scientific);
        let f = float_repr(500.0, "5e2");
        assert_eq!(0, f.precision);
        assert!(f.scientific);
        let f = float_repr(6.26e-34, "6.26e-34");
        assert_eq!(2, f.precision);
        assert!(f.scientific);
        let f = float_repr(1000000.0, "1E6");
        assert!(f.scientific);
        let f = float_repr(f64::INFINITY, "inf");
        assert_eq!(0, f.precision);
        assert!(! f.scientific);
    }

    #[test]
    fn render_formats() {
        assert_eq!("%H:%M:%S", render_format("07:32:00"));
        assert_eq!("%H:%M:%S.999", render_format("07:32:00.999"));
        assert_eq!("%H:%M:%S.500", render_format("07:32:00.5"));
        assert_eq!("%H:%M:%S.460", render_format("07:32:00.46"));
        assert_eq!("%Y-%m-%dT%H:%M:%S", render_format("1979-05-27T07:32:00"));
        assert_eq!("%Y-%m-%dt%H:%M:%S", render_format("1979-05-27t07:32:00"));
        assert_eq!("%Y-%m-%d %H:%M:%S", render_format("1979-05-27 07:32:00"));
        assert_eq!("%Y-%m-%dT%H:%M:%S-08:00", render_format("1979-05-27T07:32:00-08:00"));
        assert_eq!("%Y-%m-%dT%H:%M:%SZ", render_format("1979-05-27T07:32:00Z"));
        assert_eq!("%Y-%m-%dT%H:%M:%S.999999+11:00",
                   render_format("1979-05-27T00:32:00.999999+11:00"));
    }

    #[test]
    fn fraction_normalization() {
        assert_eq!("500", normalized_fraction("5"));
        assert_eq!("460", normalized_fraction("46"));
        assert_eq!("123", normalized_fraction("123"));
        assert_eq!("123456789", normalized_fraction("1234567891234"));
        assert_eq!("", normalized_fraction(""));
    }
}

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

//! Common exceptions for all parts of Tomlcore.

use regex::Regex;
use std::collections::HashMap;
use std::env;
use std::fmt;

/// Raise an exception
#[macro_export]
macro_rules! tomlxe {
    ($id: expr) => {
        TomlException::new($id)
    };
    ($id: expr $(,$arg: expr)+) => {
        TomlException::with_args($id, &[$($arg),+])
    };
}

/// Exception IDs

// General errors
pub const E_FILE_NOT_FOUND: &str = "E-FileNotFound";
pub const E_FILE_READ_ERR: &str = "E-FileReadError";
pub const E_TOML_INVALID_UTF8: &str = "E-Toml-InvalidUtf8";
pub const E_TOML_INPUT_TOO_LARGE: &str = "E-Toml-InputTooLarge";
pub const E_TOML_TOO_MANY_LINES: &str = "E-Toml-TooManyLines";
pub const E_TOML_PARSE_FAILED: &str = "E-Toml-ParseFailed";

// Scanner related errors
pub const E_TOML_2DIGIT_DAY_REQUIRED: &str = "E-Toml-TwoDigitDayRequired";
pub const E_TOML_2DIGIT_HOUR_REQUIRED: &str = "E-Toml-TwoDigitHourRequired";
pub const E_TOML_2DIGIT_MONTH_REQUIRED: &str = "E-Toml-TwoDigitMonthRequired";
pub const E_TOML_4DIGIT_YEAR_REQUIRED: &str = "E-Toml-FourDigitYearRequired";
pub const E_TOML_DIGIT_DELIM_NOT_EMBEDDED: &str = "E-Toml-DigitDelimiterNotEmbedded";
pub const E_TOML_DIGIT_EXPECTED: &str = "E-Toml-DigitExpected";
pub const E_TOML_EMPTY_FLOAT_FRACT: &str = "E-Toml-EmptyFloatFract";
pub const E_TOML_INVALID_CHAR: &str = "E-Toml-InvalidChar";
pub const E_TOML_INV_CTRL_CHAR: &str = "E-Toml-InvalidControlChar";
pub const E_TOML_INV_DATE: &str = "E-Toml-InvalidDate";
pub const E_TOML_INV_EOL_ESC: &str = "E-Toml-InvalidLineEndingEscape";
pub const E_TOML_INV_ESC_CHAR: &str = "E-Toml-InvalidEscapeChar";
pub const E_TOML_INV_FLOAT_EXP: &str = "E-Toml-InvalidFloatExp";
pub const E_TOML_INV_KEY_START: &str = "E-Toml-InvalidKeyStart";
pub const E_TOML_INV_NUMDT_CHAR: &str = "E-Toml-InvalidNumDateTimeChar";
pub const E_TOML_INV_NUM_CHAR: &str = "E-Toml-InvalidNumChar";
pub const E_TOML_INV_RADIX_PREFIX: &str = "E-Toml-InvalidRadixPrefix";
pub const E_TOML_INV_TIME: &str = "E-Toml-InvalidTime";
pub const E_TOML_INV_UNICODE_ESC_CHAR: &str = "E-Toml-InvalidUnicodeEscapeChar";
pub const E_TOML_INV_UNICODE_ESC_SEQ: &str = "E-Toml-InvalidUnicodeEscapeSeq";
pub const E_TOML_INV_VALUE: &str = "E-Toml-InvalidValue";
pub const E_TOML_INV_VALUE_START: &str = "E-Toml-InvalidValueStart";
pub const E_TOML_KEY_TOO_LONG: &str = "E-Toml-KeyTooLong";
pub const E_TOML_LEADING_ZERO_NOT_ALLOWED: &str = "E-Toml-LeadingZeroNotAllowed";
pub const E_TOML_SGL_LINE_TERM: &str = "E-Toml-LineTermInSingleLineString";
pub const E_TOML_TOO_MANY_QUOTES: &str = "E-Toml-TooManyQuotes";
pub const E_TOML_TZ_OR_FRACT_EXPECTED: &str = "E-Toml-TimezoneOrFractionExpected";
pub const E_TOML_UNTERMINATED_STR: &str = "E-Toml-UnterminatedString";
pub const E_TOML_VALUE_TOO_LONG: &str = "E-Toml-ValueTooLong";

// Parser related errors
pub const E_TOML_ARRAY_TOO_LARGE: &str = "E-Toml-ArrayTooLarge";
pub const E_TOML_CLOSING_BRACKET_EXPECTED: &str = "E-Toml-ClosingBracketExpected";
pub const E_TOML_COMMA_EXPECTED: &str = "E-Toml-CommaExpected";
pub const E_TOML_COMMA_OR_RBRACE_EXPECTED: &str = "E-Toml-CommaOrRBraceExpected";
pub const E_TOML_DUP_SEP_TOKEN: &str = "E-Toml-DuplicateSeparatorToken";
pub const E_TOML_EQUAL_EXPECTED: &str = "E-Toml-EqualExpected";
pub const E_TOML_INV_ARRAY_TOKEN: &str = "E-Toml-InvalidArrayToken";
pub const E_TOML_INV_KEY_TERM: &str = "E-Toml-InvalidKeyTermination";
pub const E_TOML_KEY_EXPECTED: &str = "E-Toml-KeyExpected";
pub const E_TOML_KEY_OR_TABLE_EXPECTED: &str = "E-Toml-KeyOrTableExpected";
pub const E_TOML_LEADING_SEP: &str = "E-Toml-LeadingSeparator";
pub const E_TOML_NO_LINE_BREAK_AFTER_HEADER: &str = "E-Toml-NoLineBreakAfterHeader";
pub const E_TOML_NO_LINE_BREAK_AFTER_KVP: &str = "E-Toml-NoLineBreakAfterKeyValuePair";
pub const E_TOML_TRAILING_DOT_IN_KEY: &str = "E-Toml-TrailingDotInKey";
pub const E_TOML_TRAILING_SEP: &str = "E-Toml-TrailingSeparator";
pub const E_TOML_TWO_DOTS_WITHIN_KEY: &str = "E-Toml-TwoDotsWithinKey";
pub const E_TOML_UNSEP_ARRAY_ITEMS: &str = "E-Toml-UnseparatedArrayItems";
pub const E_TOML_UNSEP_KEYPARTS: &str = "E-Toml-UnseparatedKeyParts";
pub const E_TOML_UNTERM_ARRAY: &str = "E-Toml-UnterminatedArray";
pub const E_TOML_UNTERM_INLINE_TABLE: &str = "E-Toml-UnterminatedInlineTable";
pub const E_TOML_VALUE_EXPECTED: &str = "E-Toml-ValueExpected";
pub const E_TOML_WS_BETWEEN_BRACKETS: &str = "E-Toml-WhitespaceBetweenBrackets";

// Document tree related errors
pub const E_TOML_ARRAY_OF_TABLES_REDEFINED: &str = "E-Toml-ArrayOfTablesRedefined";
pub const E_TOML_KEY_ALREADY_IN_USE: &str = "E-Toml-KeyAlreadyInUse";
pub const E_TOML_NOT_AN_ARRAY_OF_TABLES: &str = "E-Toml-NotAnArrayOfTables";
pub const E_TOML_NOT_A_TABLE: &str = "E-Toml-NotATable";
pub const E_TOML_TABLE_REDEFINED: &str = "E-Toml-TableRedefined";
pub const E_TOML_TOO_MANY_SUBKEYS: &str = "E-Toml-TooManySubKeys";

lazy_static! {
    /// Singleton instance of hash table with language dependent resources
    pub static ref TOML_MSG_TABLE: HashMap<String, String> = {
        let loc = locale().to_lowercase();
        if loc.starts_with("de") {
            let res = include_str!("messages_de.txt");
            return parse_resource(res)
        }
        let res = include_str!("messages_en.txt");
        parse_resource(res)
    };
}

/// Returns localized message for given message ID
pub fn localized_message(msg_id: &str) -> String {
    TOML_MSG_TABLE.get(msg_id).unwrap_or(&msg_id.to_string()).clone()
}

/// Error describing a problem found during parsing or document manipulation.
#[derive (Clone, Debug)]
pub struct TomlException {
    // Exception ID, serves as key into the localized message table.
    // The associated message may contain `%s` placeholders which will be replaced with
    // argument values.
    id: &'static str,
    // Argument values in case the message contains placeholders
    args: Option<Vec<String>>,
    // optional root cause
    cause: Option<Box<TomlException>>
}
impl TomlException {
    /// Creates an exception without arguments.
    ///
    /// # Arguments
    /// * `id' - the exception ID
    #[inline]
    pub fn new (id: &'static str) -> TomlException {
        TomlException { id, args: None, cause: None }
    }

    /// Creates an exception with an arbitrary number of arguments.
    ///
    /// # Arguments
    /// * `id' - the exception ID
    /// * `args' - the arguments
    pub fn with_args (id: &'static str, args: &[String]) -> TomlException {
        let mut v = Vec::<String>::new();
        v.extend(args.iter().map(|e| { (*e).to_string() }));
        TomlException { id, args: Some(v), cause: None }
    }

    /// Sets the root cause for this exception.
    ///
    /// # Arguments
    /// * `cause' - the exception describing the root cause
    #[inline]
    pub fn set_cause(&mut self, cause: TomlException) { self.cause = Some(Box::new(cause)); }

    /// Returns the root cause of this exception.
    #[inline]
    pub fn cause(&self) -> Option<&TomlException> { self.cause.as_deref() }

    /// Returns the exception ID.
    /// Prefix E- is followed by a component indicator, if component specific.
    /// ID serves as a key in the mapping table to language dependent text.
    #[inline]
    pub fn id(&self) -> &'static str { self.id }

    /// Indicates whether this exception carries argument values.
    #[inline]
    pub fn has_args(&self) -> bool {
        self.args.is_some()
    }

    /// Returns the number of optional argument values contained in this message.
    #[inline]
    pub fn arg_count(&self) -> usize {
        if let Some(p) = &self.args { return p.len() }
        0
    }

    /// Returns the optional argument values.
    #[inline]
    pub fn args(&self) -> &Option<Vec<String>> { &self.args }

    /// Replaces the current arguments with those specified.
    /// Used when a subordinate module issued an exception, and the arguments must be enhanced
    /// with informations not known by the subordinate module.
    pub fn replace_args(&mut self, new_args: &[String]) {
        self.args = Some(new_args.to_vec());
    }

    /// Returns the localized exception message.
    pub fn localized_message(&self) -> String { self.evaluate(&TOML_MSG_TABLE) }

    /// Localizes the exception and substitutes placeholder variables with their values.
    ///
    /// # Arguments
    /// * `localized_texts' - the hash map with the language dependent resources
    pub fn evaluate(&self, localized_texts: &HashMap<String, String>) -> String {
        let mut res = String::with_capacity(160);
        let eid = &self.id.to_string();
        let msg = localized_texts.get(self.id).unwrap_or(eid);
        if self.args.is_none() && self.cause.is_none() { return msg.to_string() }
        let mut pars = self.args.clone().unwrap_or_default();
        if let Some(inner_ex) = &self.cause { pars.push(inner_ex.evaluate(localized_texts)); }
        let par_count = pars.len();
        let mut expect_var = false;
        let mut par_index = 0;
        for c in msg.chars() {
            if expect_var {
                if c == 's' {
                    if par_index < par_count {
                        res.push_str(&pars[par_index]);
                        par_index += 1;
                    }
                } else {
                    if c != '%' { res.push('%'); }
                    res.push(c);
                }
                expect_var = false;
                continue;
            }
            if c == '%' {
                expect_var = true;
                continue;
            }
            res.push(c);
        }
        res
    }
}
impl fmt::Display for TomlException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.localized_message())
    }
}

#[cfg(unix)]
fn locale() -> String {
    #[cfg(test)]
    if let Ok(lang) = env::var(ENV_VAR_TOML_LANG) { return lang }
    if let Ok(lang) = env::var(ENV_VAR_LANG) { return lang }
    String::from(DEFAULT_LOCALE)
}

#[cfg(windows)]
fn locale() -> String {
    #[cfg(test)]
    if let Ok(lang) = env::var(ENV_VAR_TOML_LANG) { return lang }
    if let Ok(lang) = env::var(ENV_VAR_LANG) { return lang }
    String::from(DEFAULT_LOCALE)
}

/// Fills the language dependent resource table from the given resource file contents.
///
/// # Arguments
/// * `contents` - the resource file contents, one message definition per line
fn parse_resource(contents: &str) -> HashMap<String, String> {
    let mut t = HashMap::<String, String>::new();
    let ignore_pattern = Regex::new(r"^\s*#.*").unwrap();
    let def_pattern = Regex::new(r"^([\w\d_\-]+)\s+(.*)$").unwrap();
    for line in contents.split('\n') {
        let line = line.trim();
        if line.is_empty() || ignore_pattern.is_match(line) {
            continue;
        }
        if let Some(groups) = def_pattern.captures(line) {
            let id = groups.get(1).unwrap().as_str();
            let text = groups.get(2).unwrap().as_str();
            t.insert(id.to_string(), text.to_string());
        }
    }
    t
}

#[cfg(test)]
const ENV_VAR_TOML_LANG: &str = "TOMLCORE_LANG";

const ENV_VAR_LANG: &str = "LANG";
const DEFAULT_LOCALE: &str = "en";

#[cfg(test)]
mod tests {
    use super::*;

    const ID_P0: &str = "ExceptionWithoutArg";
    const ID_P1: &str = "ExceptionWithOneArg";
    const ID_P3: &str = "ExceptionWithThreeArgs";
    const TEXT_P0: &str = "Something went wrong.";
    const TEXT_P1: &str = "Line %s: Something went wrong.";
    const TEXT_P3: &str = "Line %s: Found %s, but expected %s.";
    const ARG_P1: &str = "123";
    const ARG_P3_1: &str = "99";
    const ARG_P3_2: &str = "=";
    const ARG_P3_3: &str = "String";
    const LOC_TEXT_P1: &str = "Line 123: Something went wrong.";
    const LOC_TEXT_P3: &str = "Line 99: Found =, but expected String.";
    const LOC_TEXT_P3_LINE_ONLY: &str = "Line 99: Found , but expected .";

    fn localized_texts() -> HashMap<String, String> {
        let mut map = HashMap::<String, String>::new();
        map.insert(ID_P0.to_string(), TEXT_P0.to_string());
        map.insert(ID_P1.to_string(), TEXT_P1.to_string());
        map.insert(ID_P3.to_string(), TEXT_P3.to_string());
        map
    }

    fn verify(x: &TomlException, expected_id: &str,
              expected_args: &Option<&[&str]>, expected_text: &str) {
        assert_eq!(x.id(), expected_id);
        match expected_args {
            Some(exp_args) => {
                match x.args() {
                    Some(actual_args) => {
                        assert_eq!(x.arg_count(), exp_args.len());
                        assert_eq!(x.arg_count(), actual_args.len());
                        for i in 0 .. exp_args.len() {
                            assert_eq!(exp_args[i], actual_args[i]);
                        }
                    },
                    None => { panic!("No args in exception found"); }
                }
            },
            None => {
                assert_eq!(x.arg_count(), 0);
                assert!(x.args().is_none());
            }
        }
        assert_eq!(x.evaluate(&localized_texts()), expected_text);
    }

    #[test]
    fn err_without_arg() {
        let x = tomlxe!(ID_P0);
        verify(&x, ID_P0, &None, TEXT_P0);
    }

    #[test]
    fn err_with_one_arg() {
        let x = tomlxe!(ID_P1, ARG_P1.to_string());
        verify(&x, ID_P1, &Some(&[ARG_P1]), LOC_TEXT_P1);
    }

    #[test]
    fn err_with_multiple_args() {
        let x = tomlxe!(ID_P3, ARG_P3_1.to_string(), ARG_P3_2.to_string(), ARG_P3_3.to_string());
        verify(&x, ID_P3, &Some(&[ARG_P3_1,ARG_P3_2,ARG_P3_3]), LOC_TEXT_P3);
    }

    // Make sure, superfluous arguments are simply ignored
    #[test]
    fn too_many_args() {
        let x = tomlxe!(ID_P1, ARG_P1.to_string(), ARG_P1.to_string());
        verify(&x, ID_P1, &Some(&[ARG_P1, ARG_P1]), LOC_TEXT_P1);
    }

    // Make sure, placeholders without supplied argument value are replaced with empty string
    #[test]
    fn too_few_args() {
        let x = tomlxe!(ID_P3, ARG_P3_1.to_string());
        verify(&x, ID_P3, &Some(&[ARG_P3_1]), LOC_TEXT_P3_LINE_ONLY);
    }

    // A nested cause is appended as the last placeholder argument
    #[test]
    fn cause_fills_trailing_placeholder() {
        let mut x = tomlxe!(ID_P3, ARG_P3_1.to_string(), ARG_P3_2.to_string());
        x.set_cause(tomlxe!(ID_P0));
        assert_eq!(x.evaluate(&localized_texts()),
                   "Line 99: Found =, but expected Something went wrong..");
    }

    // Unknown message IDs fall back to the ID itself
    #[test]
    fn unknown_id_falls_back_to_id() {
        let x = tomlxe!("NoSuchId");
        assert_eq!(x.evaluate(&localized_texts()), "NoSuchId");
    }
}

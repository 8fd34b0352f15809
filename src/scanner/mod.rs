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

//! Lexical analyzer for TOML formatted strings.

mod basicstates;
mod datetimestates;
mod numberstates;
mod stringstates;

use crate::errorhandling::*;
use crate::limits::TomlLimits;
use crate::quoted;
use basicstates::*;
use datetimestates::*;
use numberstates::*;
use stringstates::*;
use chrono::{DateTime, ParseError};
use chrono::naive::{NaiveDate, NaiveDateTime, NaiveTime};
use chrono::offset::FixedOffset;
use num_traits::float::FloatCore;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::num::{ParseFloatError, ParseIntError};
use std::rc::Rc;
use std::str::{FromStr, ParseBoolError};

const NULL: char = '\0';
const TAB: char = '\t';
const LINE_FEED: char = '\n';
const CARRIAGE_RETURN: char = '\r';
const SPACE: char = ' ';

/// Lexical TOML tokens
#[derive (Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum TokenId {
    Equal,
    Comma,
    Dot,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    DoubleLeftBracket,
    DoubleRightBracket,
    Key,
    Value,
    LineBreak,
    EndOfInput
}
impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenId::Equal => write!(f, "="),
            TokenId::Comma => write!(f, ","),
            TokenId::Dot => write!(f, "."),
            TokenId::LeftBrace => write!(f, "{{"),
            TokenId::RightBrace => write!(f, "}}"),
            TokenId::LeftBracket => write!(f, "["),
            TokenId::RightBracket => write!(f, "]"),
            TokenId::DoubleLeftBracket => write!(f, "[["),
            TokenId::DoubleRightBracket => write!(f, "]]"),
            TokenId::Key => write!(f, "<KEY>"),
            TokenId::Value => write!(f, "<VALUE>"),
            TokenId::LineBreak => write!(f, "<LINE_BREAK>"),
            TokenId::EndOfInput => write!(f, "<END-OF-INPUT>")
        }
    }
}

/// Value types a token of ID Value may carry
#[derive (Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum TokenValueType {
    String,
    Boolean,
    Integer,
    Float,
    OffsetDateTime,
    LocalDateTime,
    LocalDate,
    LocalTime
}

/// TOML scanner.
/// Separates a TOML formatted string into a stream of tokens.
pub(crate) struct TomlScanner {
    // TOML formatted character sequence
    data: Vec<char>,
    // end-of-data marker, length of input character sequence
    end_of_data_index: usize,
    // index of next character in input sequence, starting with 0
    current_index: usize,
    // index in input sequence, where current token begins
    token_index: usize,
    // value type of found token
    token_value_type: TokenValueType,
    // value of found token
    token_value: String,
    // stack of currently suspended states
    suspended_states: Vec<ScannerStateId>,
    // hash table containing all handler states
    states: ScannerStateMap,
    // structural limits for key and value token lengths
    limits: TomlLimits
}
impl TomlScanner {
    /// Creates a scanner for the given TOML string.
    ///
    /// # Arguments
    /// * `data` - the string containing the input data to scan
    /// * `limits` - the structural limits to apply
    pub(crate) fn new(data: &str, limits: TomlLimits) -> TomlScanner {
        let vdata: Vec::<char> = data.chars().collect();
        let vdata_len = vdata.len();
        TomlScanner {
            data: vdata,
            end_of_data_index: vdata_len,
            current_index: 0,
            token_index: 0,
            token_value_type: TokenValueType::String,
            token_value: String::with_capacity(64),
            suspended_states: Vec::new(),
            states: TomlScanner::handler_states(),
            limits
        }
    }

    /// Returns the current line and column number.
    /// Needed in case of errors.
    #[inline]
    pub(crate) fn current_position(&self) -> (usize, usize) {
        self.position_from_index(self.current_index)
    }

    /// Returns the line and column number, where current token begins.
    /// Needed in case of errors.
    #[inline]
    pub(crate) fn token_position(&self) -> (usize, usize) {
        self.position_from_index(self.token_index)
    }

    /// Returns the value type of the last scanned token.
    #[inline]
    pub(crate) fn token_value_type(&self) -> TokenValueType {
        self.token_value_type
    }

    /// Returns the string value of the last scanned token.
    #[inline]
    pub(crate) fn token_value(&self) -> &str {
        self.token_value.as_str()
    }

    /// Returns the boolean value of the last scanned token.
    ///
    /// # Errors
    /// Returns a ParseError if the last token scanned was not a boolean value
    pub(crate) fn bool_token_value(&self) -> Result<bool, ParseBoolError> {
        self.token_value.parse::<bool>()
    }

    /// Returns the integer value of the last scanned token.
    ///
    /// # Errors
    /// Returns a ParseError if the last token scanned was not an integer value or the value
    /// is out of i64 range
    pub(crate) fn int_token_value(&self) -> Result<i64, ParseIntError> {
        if self.token_value.starts_with("0b") {
            return i64::from_str_radix(&self.token_value()[2..], 2)
        }
        if self.token_value.starts_with("0o") {
            return i64::from_str_radix(&self.token_value()[2..], 8)
        }
        if self.token_value.starts_with("0x") {
            return i64::from_str_radix(&self.token_value()[2..], 16)
        }
        i64::from_str(self.token_value())
    }

    /// Returns the float value of the last scanned token.
    ///
    /// # Errors
    /// Returns a ParseError if the last token scanned was not a float value or the value
    /// is out of f64 range
    pub(crate) fn f64_token_value(&self) -> Result<f64, ParseFloatError> {
        match self.token_value.as_str() {
            "inf" | "+inf" => Ok(f64::infinity()),
            "-inf" => Ok(f64::neg_infinity()),
            "nan" | "+nan" => Ok(f64::nan()),
            "-nan" => Ok(f64::from_bits(f64::nan().to_bits() | 0x8000000000000000)),
            _ => self.token_value.parse::<f64>()
        }
    }

    /// Returns the offset date-time value of the last scanned token.
    ///
    /// # Errors
    /// Returns a ParseError if the last token scanned was not an offset date-time value or the
    /// value specified is not valid
    pub(crate) fn offset_datetime_token_value(&self) -> Result<DateTime<FixedOffset>, ParseError> {
        to_offset_datetime(&self.token_value)
    }

    /// Returns the local date-time value of the last scanned token.
    ///
    /// # Errors
    /// Returns a ParseError if the last token scanned was not a local date-time value or the
    /// value specified is not valid
    pub(crate) fn local_datetime_token_value(&self) -> Result<NaiveDateTime, ParseError> {
        to_naive_datetime(&self.token_value)
    }

    /// Returns the local date value of the last scanned token.
    ///
    /// # Errors
    /// Returns a ParseError if the last token scanned was not a local date value or the
    /// value specified is not valid
    pub(crate) fn local_date_token_value(&self) -> Result<NaiveDate, ParseError> {
        NaiveDate::parse_from_str(&self.token_value, "%Y-%m-%d")
    }

    /// Returns the local time value of the last scanned token.
    ///
    /// # Errors
    /// Returns a ParseError if the last token scanned was not a local time value or the
    /// value specified is not valid
    pub(crate) fn local_time_token_value(&self) -> Result<NaiveTime, ParseError> {
        to_naive_time(&self.token_value)
    }

    /// Returns the next lexical unit of the TOML formatted data.
    ///
    /// # Arguments
    /// * `expect_key` - indicates whether a key is expected as next token or not
    ///
    /// # Errors
    /// Returns a structure containing information if an error was encountered during the
    /// scan process
    pub(crate) fn next_token(&mut self, expect_key: bool) -> Result<TokenId, TomlException> {
        self.token_value.clear();
        self.suspended_states.clear();
        // we always start with IDLE state
        let mut current_state_id = ScannerStateId::Idle;
        let mut current_state = self.states.get(&current_state_id).unwrap();
        // scan loop
        while self.current_index <= self.end_of_data_index {
            let ch = if self.current_index >= self.end_of_data_index {
                NULL } else { self.data[self.current_index] };
            self.current_index += 1;
            // contents is handled in the state structures
            match current_state.borrow_mut().process_char(ch, expect_key) {
                StateResult::TokenFound(correction, mark_beg, t_id, t_type, t_value) => {
                    // Token found, we're through
                    self.token_value_type = t_type;
                    if mark_beg {
                        self.token_index = self.current_index - 1;
                    }
                    self.current_index -= correction;
                    if let Some(tval) = t_value { self.token_value.push_str(&tval); }
                    return Ok(t_id)
                },
                StateResult::Finished(correction, mark_beg, consume_char, follow_state_id) => {
                    // Current state fulfilled its duty, transfer to next state
                    if mark_beg {
                        self.token_index = self.current_index - 1;
                    }
                    self.current_index -= correction;
                    if consume_char { self.token_value.push(ch); }
                    current_state_id = follow_state_id;
                    current_state = self.states.get(&current_state_id).unwrap();
                    current_state.borrow_mut().activate();
                },
                StateResult::Suspended(correction, follow_state_id) => {
                    // Current state needs help of another state
                    self.current_index -= correction;
                    self.suspended_states.push(current_state_id);
                    current_state_id = follow_state_id;
                    current_state = self.states.get(&current_state_id).unwrap();
                    current_state.borrow_mut().activate();
                },
                StateResult::CharError(correction, error_id, ch) => {
                    // Current state encountered an invalid character.
                    // Error messages always start with placeholders for line number and
                    // column number.
                    // For invalid characters the current line and column number are relevant.
                    let (line_nr, col_nr) = self.position_from_index(self.current_index-1);
                    self.current_index -= correction;
                    let ch_str = if ch == '\'' { String::from("\"'\"") }
                                 else { quoted(format!("{:?}", ch).trim_matches('\'')) };
                    let x_params = vec!(line_nr.to_string(), col_nr.to_string(), ch_str);
                    return Err(TomlException::with_args(error_id, &x_params))
                },
                StateResult::Error(error_id, incl_token_val, params) => {
                    // Current state encountered an error
                    // Error messages always start with placeholders for line number and
                    // column number.
                    // For general errors the line and column number where the current token
                    // starts is relevant.
                    let (line_nr, col_nr) = self.position_from_index(self.token_index);
                    let mut x_params = vec!(line_nr.to_string(), col_nr.to_string());
                    if incl_token_val { x_params.push(quoted(&self.token_value)); }
                    if let Some(p) = params { x_params.push(quoted(&p)); }
                    return Err(TomlException::with_args(error_id, &x_params))
                },
                StateResult::ResumeCallingState(correction, value_char, count) => {
                    // Current state fulfilled its duty, transfer to last suspended state
                    self.current_index -= correction;
                    for _n in 1 ..= count {
                        self.token_value.push(value_char);
                    }
                    current_state_id = self.suspended_states.pop().unwrap();
                    current_state = self.states.get(&current_state_id).unwrap();
                },
                StateResult::CharProcessed(consume_char) => {
                    // Current state remains active, just store current character in token_value
                    // attribute
                    if consume_char { self.token_value.push(ch); }
                }
            }
            // bounded token buffers: keys and values must not exceed the configured lengths
            let cap = if expect_key { self.limits.max_key_len } else { self.limits.max_string_len };
            if self.token_value.len() > cap {
                let (line_nr, col_nr) = self.position_from_index(self.token_index);
                let code = if expect_key { E_TOML_KEY_TOO_LONG } else { E_TOML_VALUE_TOO_LONG };
                let x_params = vec!(line_nr.to_string(), col_nr.to_string(), cap.to_string());
                return Err(TomlException::with_args(code, &x_params))
            }
        }
        Ok(TokenId::EndOfInput)
    }

    /// Creates all handler states for a TOML scanner.
    ///
    /// # Return values
    /// A hashmap with all handler states, indexed by their state ID
    fn handler_states() -> ScannerStateMap {
        let mut m = ScannerStateMap::new();
        m.insert(ScannerStateId::Idle, IdleState::new());
        m.insert(ScannerStateId::Comment, CommentState::new());
        m.insert(ScannerStateId::LineBreak, LineBreakState::new());
        m.insert(ScannerStateId::LBracket, BracketState::new('[', TokenId::LeftBracket,
                                                                    TokenId::DoubleLeftBracket));
        m.insert(ScannerStateId::RBracket, BracketState::new(']', TokenId::RightBracket,
                                                                    TokenId::DoubleRightBracket));
        m.insert(ScannerStateId::BareKey, BareKeyState::new());
        m.insert(ScannerStateId::DoubleQuotedKey, DoubleQuotedKeyState::new());
        m.insert(ScannerStateId::SingleQuotedKey, SingleQuotedKeyState::new());
        m.insert(ScannerStateId::StartOfBasicString,
                        StartOfStringState::new('"', ScannerStateId::BasicString,
                                                ScannerStateId::MultiLineBasicString));
        m.insert(ScannerStateId::StartOfLiteralString,
                        StartOfStringState::new('\'', ScannerStateId::LiteralString,
                                                ScannerStateId::MultiLineLiteralString));
        m.insert(ScannerStateId::BasicString, BasicStringState::new());
        m.insert(ScannerStateId::MultiLineBasicString, MultiLineBasicStringState::new());
        m.insert(ScannerStateId::LiteralString, LiteralStringState::new());
        m.insert(ScannerStateId::MultiLineLiteralString, MultiLineLiteralStringState::new());
        m.insert(ScannerStateId::Zero, ZeroState::new());
        m.insert(ScannerStateId::SignedZero, SignedZeroState::new());
        m.insert(ScannerStateId::BinInt, RadixIntState::new(validate_bin_digit));
        m.insert(ScannerStateId::OctInt, RadixIntState::new(validate_oct_digit));
        m.insert(ScannerStateId::HexInt, RadixIntState::new(validate_hex_digit));
        m.insert(ScannerStateId::FloatFraction, FloatFractionState::new());
        m.insert(ScannerStateId::FloatExponent, FloatExponentState::new());
        m.insert(ScannerStateId::Number, NumberState::new());
        m.insert(ScannerStateId::SignedNumber, SignedNumberState::new());
        m.insert(ScannerStateId::NumberOrDateTime, NumberOrDateTimeState::new());
        m.insert(ScannerStateId::SymbolicValue, SymbolicValueState::new());
        m.insert(ScannerStateId::DateOrDateTime, DateOrDateTimeState::new());
        m.insert(ScannerStateId::SpaceAfterDate, SpaceAfterDateState::new());
        m.insert(ScannerStateId::LocalTime, LocalTimeState::new());
        m.insert(ScannerStateId::OffsetTime, OffsetTimeState::new());
        m.insert(ScannerStateId::FractionalSeconds, FractionalSecondsState::new());
        m.insert(ScannerStateId::TimeZoneOffset, TimeZoneOffsetState::new());
        m.insert(ScannerStateId::SingleLineEscSequence, EscapeSequenceState::new(false));
        m.insert(ScannerStateId::MultiLineEscSequence, EscapeSequenceState::new(true));
        m.insert(ScannerStateId::ExtraneousWhitespace, ExtraneousWhitespaceState::new());
        m.insert(ScannerStateId::DoubleQuoteDelimSequence, DelimSequenceState::new('"'));
        m.insert(ScannerStateId::SingleQuoteDelimSequence, DelimSequenceState::new('\''));
        m.insert(ScannerStateId::InitialMultiLineCr, InitialMultiLineCrState::new());
        m
    }

    /// Returns the line and column number from the specified input data index.
    /// Needed in case of errors.
    fn position_from_index(&self, index: usize) -> (usize, usize) {
        let mut line_nr: usize = 1;
        let mut col_nr: usize = 1;
        for (i, ch) in self.data.iter().enumerate() {
            if i >= index { break; }
            col_nr += 1;
            if *ch == LINE_FEED {
                line_nr += 1;
                col_nr = 1;
            }
        }
        (line_nr, col_nr)
    }
}

/// ID's for all handler states
#[derive (Clone, Copy, Debug, Eq, Hash, PartialEq)]
enum ScannerStateId {
    Idle,
    Comment,
    LineBreak,
    LBracket,
    RBracket,
    BareKey,
    DoubleQuotedKey,
    SingleQuotedKey,
    StartOfBasicString,
    StartOfLiteralString,
    BasicString,
    MultiLineBasicString,
    LiteralString,
    MultiLineLiteralString,
    Zero,
    SignedZero,
    BinInt,
    OctInt,
    HexInt,
    FloatFraction,
    FloatExponent,
    Number,
    SignedNumber,
    NumberOrDateTime,
    DateOrDateTime,
    SpaceAfterDate,
    LocalTime,
    OffsetTime,
    FractionalSeconds,
    TimeZoneOffset,
    SymbolicValue,
    SingleLineEscSequence,
    MultiLineEscSequence,
    ExtraneousWhitespace,
    DoubleQuoteDelimSequence,
    SingleQuoteDelimSequence,
    InitialMultiLineCr
}

/// Function signature for character validation
type ValidateChar = fn(char) -> bool;

/// Type alias for hash map of handler states
type ScannerStateMap = HashMap::<ScannerStateId, Rc<RefCell<dyn TokenAnalyzer>>>;

/// Enumeration for all possible results returned by handler states
#[derive (Clone, Debug)]
enum StateResult {
    /// The current state wants to remain active
    /// * argument indicates whether to store current character in token_value attribute or not
    CharProcessed(bool),
    /// The current state finished and wants the last suspended state to be activated again
    /// * first argument holds the number of characters that the input data index shall be moved
    ///   backward
    /// * second and third argument hold a character and the count, how often it shall be
    ///   appended to the token_value attribute
    ResumeCallingState(usize, char, u32),
    /// The current state finished and wants the specified state to be activated
    /// * first argument holds the number of characters that the input data index shall be moved
    ///   backward
    /// * second argument indicates whether the current input data index shall be marked as
    ///   beginning of the scanned token_value
    /// * third argument indicates whether to store current character in token_value attribute
    /// * last argument holds the ID of the state to activate
    Finished(usize, bool, bool, ScannerStateId),
    /// The current state wants to be suspended and the specified state to be activated
    /// * first argument holds the number of characters that the input data index shall be moved
    ///   backward
    /// * last argument holds the ID of the state to activate
    Suspended(usize, ScannerStateId),
    /// The current state encountered an unexpected character.
    /// * first argument holds the number of characters that the input data index shall be moved
    ///   backward
    /// * second argument holds the error ID
    /// * last argument holds the character
    CharError(usize, &'static str, char),
    /// The current state encountered an error
    /// * first argument holds the error ID
    /// * second argument indicates whether to include the current token value in the
    ///   exception parameters
    /// * last argument holds an optional parameter for the error
    Error(&'static str, bool, Option<String>),
    /// The current state detected a token
    /// * first argument holds the number of characters that the input data index shall be moved
    ///   backward
    /// * second argument indicates whether the current input data index shall be marked as
    ///   beginning of the scanned token_value
    /// * third argument holds the ID of the detected token
    /// * fourth argument holds the value type of the detected token
    /// * last argument holds the optional string that shall be appended to the token_value
    ///   attribute
    TokenFound(usize, bool, TokenId, TokenValueType, Option<String>)
}

/// Functions to be supported by all handler states
trait TokenAnalyzer {
    /// Handles the next character from TOML input data.
    /// #Arguments
    /// * `ch` - the character to process
    /// * `expect_key` - set to **true** if a key is expected; **false** for other tokens
    ///
    /// # Return values
    /// * the processing result
    fn process_char(&mut self, ch: char, expect_key: bool) -> StateResult;

    /// Invoked by the scanner when the state is activated.
    /// When a suspended state is resumed, it is **not** activated again.
    fn activate(&mut self) {}
}

/// Checks, whether the given character is a binary digit ('0' or '1').
fn validate_bin_digit(digit: char) -> bool {
    digit == '0' || digit == '1'
}

/// Checks, whether the given character is an octal digit ('0' - '7').
fn validate_oct_digit(digit: char) -> bool {
    ('0' ..= '7').contains(&digit)
}

/// Checks, whether the given character is a hexadecimal digit ('0'-'9', 'A'-'F', 'a'-'f').
fn validate_hex_digit(digit: char) -> bool {
    digit.is_ascii_hexdigit()
}

/// Checks, whether the given character terminates a number or date-time token.
/// The set is the union of the terminators valid at statement scope, within arrays and within
/// inline tables. A terminator illegal in the current context yields a token the parser rejects.
fn is_value_end(ch: char) -> bool {
    matches!(ch, SPACE | TAB | LINE_FEED | CARRIAGE_RETURN | NULL | ',' | ']' | '}' | '#')
}

/// Converts the given string to a naive time value.
/// #Arguments
/// * `val` - the value to convert
///
/// # Return values
/// * the naive time value
///
/// # Errors
/// Returns a ParseError if the specified string does not represent a valid time
fn to_naive_time(val: &str) -> Result<NaiveTime, ParseError> {
    if val.contains('.') { return NaiveTime::parse_from_str(val, "%T%.f") }
    NaiveTime::parse_from_str(val, "%T")
}

/// Converts the given string to a naive date-time value.
/// #Arguments
/// * `val` - the value to convert
///
/// # Return values
/// * the naive date-time value
///
/// # Errors
/// Returns a ParseError if the specified string does not represent a valid date-time
fn to_naive_datetime(val: &str) -> Result<NaiveDateTime, ParseError> {
    let mut fmt_str = String::with_capacity(32);
    fmt_str.push_str("%F");
    fmt_str.push(val.chars().nth(10).unwrap_or('T'));
    fmt_str.push_str("%T");
    if val.contains('.') { fmt_str.push_str("%.f"); }
    NaiveDateTime::parse_from_str(val, &fmt_str)
}

/// Converts the given string to an offset date-time value.
/// #Arguments
/// * `val` - the value to convert
///
/// # Return values
/// * the offset date-time value
///
/// # Errors
/// Returns a ParseError if the specified string does not represent a valid offset date-time
fn to_offset_datetime(val: &str) -> Result<DateTime<FixedOffset>, ParseError> {
    let mut fmt_str: String = String::with_capacity(32);
    fmt_str.push_str("%F");
    fmt_str.push(val.chars().nth(10).unwrap_or('T'));
    fmt_str.push_str("%T");
    if val.contains('.') { fmt_str.push_str("%.f"); }
    fmt_str.push_str("%:z");
    if val.ends_with('Z') || val.ends_with('z') {
        let mut val_str = val.to_string();
        val_str.truncate(val_str.len() - 1);
        val_str.push_str("+00:00");
        return DateTime::parse_from_str(&val_str, &fmt_str)
    }
    DateTime::parse_from_str(val, &fmt_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scanner_for(data: &str) -> TomlScanner {
        TomlScanner::new(data, TomlLimits::default())
    }

    /// Scans a single value token and returns its ID.
    fn scan_value(data: &str) -> Result<(TokenId, TokenValueType, String), TomlException> {
        let mut scanner = scanner_for(data);
        let tid = scanner.next_token(false)?;
        Ok((tid, scanner.token_value_type(), scanner.token_value().to_string()))
    }

    /// Scans a single key token and returns its ID.
    fn scan_key(data: &str) -> Result<(TokenId, String), TomlException> {
        let mut scanner = scanner_for(data);
        let tid = scanner.next_token(true)?;
        Ok((tid, scanner.token_value().to_string()))
    }

    fn assert_value(data: &str, exp_type: TokenValueType, exp_value: &str) {
        let (tid, vtype, value) = scan_value(data).unwrap();
        assert_eq!(TokenId::Value, tid, "input {}", data);
        assert_eq!(exp_type, vtype, "input {}", data);
        assert_eq!(exp_value, value, "input {}", data);
    }

    fn assert_value_error(data: &str, exp_id: &str) {
        let mut scanner = scanner_for(data);
        loop {
            match scanner.next_token(false) {
                Ok(TokenId::EndOfInput) => panic!("input {} scanned without error", data),
                Ok(_) => (),
                Err(ex) => {
                    assert_eq!(exp_id, ex.id(), "input {}", data);
                    break
                }
            }
        }
    }

    #[test]
    fn structural_tokens() {
        let mut scanner = scanner_for("= , . { } [ ] [[ ]]\n");
        let expected = [TokenId::Equal, TokenId::Comma, TokenId::Dot, TokenId::LeftBrace,
                        TokenId::RightBrace, TokenId::LeftBracket, TokenId::RightBracket,
                        TokenId::DoubleLeftBracket, TokenId::DoubleRightBracket,
                        TokenId::LineBreak, TokenId::EndOfInput];
        for exp in expected {
            // key mode, like the parser requests tokens at statement scope
            assert_eq!(exp, scanner.next_token(true).unwrap());
        }
    }

    #[test]
    fn bare_and_quoted_keys() {
        assert_eq!(("k1-x_2".to_string()), scan_key("k1-x_2 = 1").unwrap().1);
        assert_eq!(("1234".to_string()), scan_key("1234 = 1").unwrap().1);
        assert_eq!(("a key".to_string()), scan_key("\"a key\" = 1").unwrap().1);
        assert_eq!(("lite ral".to_string()), scan_key("'lite ral' = 1").unwrap().1);
        assert_eq!(("tab\there".to_string()), scan_key("\"tab\\there\" = 1").unwrap().1);
    }

    #[test]
    fn basic_strings() {
        assert_value("\"plain\"\n", TokenValueType::String, "plain");
        assert_value("\"\"\n", TokenValueType::String, "");
        assert_value("\"q\\\"q\"\n", TokenValueType::String, "q\"q");
        assert_value("\"esc\\t\\n\\r\\f\\b\\\\\"\n", TokenValueType::String,
                     "esc\t\n\r\u{000c}\u{0008}\\");
        assert_value("\"\\u00E9\\U0001F600\"\n", TokenValueType::String, "\u{e9}\u{1f600}");
    }

    #[test]
    fn literal_strings() {
        assert_value("'C:\\temp'\n", TokenValueType::String, "C:\\temp");
        assert_value("''\n", TokenValueType::String, "");
    }

    #[test]
    fn multiline_basic_strings() {
        assert_value("\"\"\"\nfirst\nsecond\"\"\"\n", TokenValueType::String, "first\nsecond");
        // line ending backslash elides all whitespace up to the next non-space character
        assert_value("\"\"\"one \\\n   two\"\"\"\n", TokenValueType::String, "one two");
        // up to two quotes before the closing delimiter belong to the string
        assert_value("\"\"\"tail\"\"\"\"\"\n", TokenValueType::String, "tail\"\"");
        assert_value("\"\"\"in \"\" side\"\"\"\n", TokenValueType::String, "in \"\" side");
    }

    #[test]
    fn multiline_literal_strings() {
        assert_value("'''\nraw \\n line'''\n", TokenValueType::String, "raw \\n line");
        assert_value("'''tail''''\n", TokenValueType::String, "tail'");
    }

    #[test]
    fn string_errors() {
        assert_value_error("\"open\n", E_TOML_UNTERMINATED_STR);
        assert_value_error("'open\n", E_TOML_UNTERMINATED_STR);
        assert_value_error("\"bad\\qesc\"\n", E_TOML_INV_ESC_CHAR);
        assert_value_error("\"\\uD800\"\n", E_TOML_INV_UNICODE_ESC_SEQ);
        assert_value_error("\"\\uZZZZ\"\n", E_TOML_INV_UNICODE_ESC_CHAR);
        assert_value_error("\"ctrl\u{0007}\"\n", E_TOML_INV_CTRL_CHAR);
        assert_value_error("\"\"\"five\"\"\"\"\"\"\n", E_TOML_TOO_MANY_QUOTES);
    }

    #[test]
    fn integers() {
        assert_value("42\n", TokenValueType::Integer, "42");
        assert_value("+99\n", TokenValueType::Integer, "99");
        assert_value("-17\n", TokenValueType::Integer, "-17");
        assert_value("0\n", TokenValueType::Integer, "0");
        assert_value("1_000_000\n", TokenValueType::Integer, "1000000");
        assert_value("0x1F\n", TokenValueType::Integer, "0x1F");
        assert_value("0o755\n", TokenValueType::Integer, "0o755");
        assert_value("0b1101\n", TokenValueType::Integer, "0b1101");
        assert_value("0xdead_beef\n", TokenValueType::Integer, "0xdeadbeef");
        let mut scanner = scanner_for("0x1F\n");
        scanner.next_token(false).unwrap();
        assert_eq!(31, scanner.int_token_value().unwrap());
    }

    #[test]
    fn integer_errors() {
        assert_value_error("042\n", E_TOML_LEADING_ZERO_NOT_ALLOWED);
        assert_value_error("+042\n", E_TOML_LEADING_ZERO_NOT_ALLOWED);
        assert_value_error("1__0\n", E_TOML_DIGIT_DELIM_NOT_EMBEDDED);
        assert_value_error("1_\n", E_TOML_DIGIT_DELIM_NOT_EMBEDDED);
        assert_value_error("0x_1\n", E_TOML_DIGIT_DELIM_NOT_EMBEDDED);
        assert_value_error("0b2\n", E_TOML_INV_NUM_CHAR);
        assert_value_error("00x1\n", E_TOML_INV_RADIX_PREFIX);
    }

    #[test]
    fn floats() {
        assert_value("3.14\n", TokenValueType::Float, "3.14");
        assert_value("-0.01\n", TokenValueType::Float, "-0.01");
        assert_value("5e2\n", TokenValueType::Float, "5e2");
        assert_value("6.26e-34\n", TokenValueType::Float, "6.26e-34");
        assert_value("1E6\n", TokenValueType::Float, "1E6");
        assert_value("9_224_617.445_991\n", TokenValueType::Float, "9224617.445991");
        assert_value("inf\n", TokenValueType::Float, "inf");
        assert_value("-inf\n", TokenValueType::Float, "-inf");
        assert_value("nan\n", TokenValueType::Float, "nan");
        // a leading plus is dropped from the token value
        assert_value("+nan\n", TokenValueType::Float, "nan");
        assert_value("-nan\n", TokenValueType::Float, "-nan");
    }

    #[test]
    fn float_errors() {
        assert_value_error("3.\n", E_TOML_EMPTY_FLOAT_FRACT);
        assert_value_error("3.e2\n", E_TOML_EMPTY_FLOAT_FRACT);
        assert_value_error("1e\n", E_TOML_INV_FLOAT_EXP);
        assert_value_error("1e+-2\n", E_TOML_INV_FLOAT_EXP);
    }

    #[test]
    fn booleans() {
        assert_value("true\n", TokenValueType::Boolean, "true");
        assert_value("false\n", TokenValueType::Boolean, "false");
        assert_value_error("maybe\n", E_TOML_INV_VALUE);
    }

    #[test]
    fn date_and_time_values() {
        assert_value("1979-05-27\n", TokenValueType::LocalDate, "1979-05-27");
        assert_value("07:32:00\n", TokenValueType::LocalTime, "07:32:00");
        assert_value("07:32:00.999\n", TokenValueType::LocalTime, "07:32:00.999");
        assert_value("1979-05-27T07:32:00\n", TokenValueType::LocalDateTime,
                     "1979-05-27T07:32:00");
        assert_value("1979-05-27t07:32:00\n", TokenValueType::LocalDateTime,
                     "1979-05-27t07:32:00");
        assert_value("1979-05-27 07:32:00\n", TokenValueType::LocalDateTime,
                     "1979-05-27 07:32:00");
        assert_value("1979-05-27T07:32:00.5\n", TokenValueType::LocalDateTime,
                     "1979-05-27T07:32:00.5");
        assert_value("1979-05-27T07:32:00Z\n", TokenValueType::OffsetDateTime,
                     "1979-05-27T07:32:00Z");
        assert_value("1979-05-27T07:32:00z\n", TokenValueType::OffsetDateTime,
                     "1979-05-27T07:32:00z");
        assert_value("1979-05-27T00:32:00-07:00\n", TokenValueType::OffsetDateTime,
                     "1979-05-27T00:32:00-07:00");
        assert_value("1979-05-27T00:32:00.999999+11:00\n", TokenValueType::OffsetDateTime,
                     "1979-05-27T00:32:00.999999+11:00");
    }

    #[test]
    fn date_and_time_errors() {
        assert_value_error("1979-5-27\n", E_TOML_2DIGIT_MONTH_REQUIRED);
        assert_value_error("1979-05-7\n", E_TOML_2DIGIT_DAY_REQUIRED);
        assert_value_error("179-05-27\n", E_TOML_4DIGIT_YEAR_REQUIRED);
        assert_value_error("7:32:00\n", E_TOML_2DIGIT_HOUR_REQUIRED);
        assert_value_error("07:3:00\n", E_TOML_INV_TIME);
        assert_value_error("07:32:0\n", E_TOML_INV_TIME);
        assert_value_error("1979-05-27T07:32\n", E_TOML_INV_TIME);
        assert_value_error("07:32:00.\n", E_TOML_INV_TIME);
        assert_value_error("1979-05-27T07:32:00.1.2\n", E_TOML_INV_TIME);
        assert_value_error("1979-05-27T07:32:00+07\n", E_TOML_INV_TIME);
    }

    #[test]
    fn value_terminators() {
        // a terminator character is pushed back and delivered as the following token
        let mut scanner = scanner_for("1]");
        assert_eq!(TokenId::Value, scanner.next_token(false).unwrap());
        assert_eq!("1", scanner.token_value());
        assert_eq!(TokenId::RightBracket, scanner.next_token(false).unwrap());
        // a comment terminates a number like whitespace does
        let mut scanner = scanner_for("2# done\n");
        assert_eq!(TokenId::Value, scanner.next_token(false).unwrap());
        assert_eq!("2", scanner.token_value());
        assert_eq!(TokenId::LineBreak, scanner.next_token(false).unwrap());
        // dates end at commas and closing brackets as well
        let mut scanner = scanner_for("1979-05-27,");
        assert_eq!(TokenId::Value, scanner.next_token(false).unwrap());
        assert_eq!(TokenValueType::LocalDate, scanner.token_value_type());
        assert_eq!(TokenId::Comma, scanner.next_token(false).unwrap());
    }

    #[test]
    fn comments_and_line_breaks() {
        let mut scanner = scanner_for("# only a comment");
        assert_eq!(TokenId::LineBreak, scanner.next_token(true).unwrap());
        assert_eq!(TokenId::EndOfInput, scanner.next_token(true).unwrap());
        let mut scanner = scanner_for("\r\n");
        assert_eq!(TokenId::LineBreak, scanner.next_token(true).unwrap());
        // carriage return without line feed is rejected
        let mut scanner = scanner_for("\rx");
        assert!(scanner.next_token(true).is_err());
    }

    #[test]
    fn empty_input() {
        let mut scanner = scanner_for("");
        assert_eq!(TokenId::LineBreak, scanner.next_token(true).unwrap());
        assert_eq!(TokenId::EndOfInput, scanner.next_token(true).unwrap());
    }

    #[test]
    fn key_length_cap() {
        let mut limits = TomlLimits::default();
        limits.max_key_len = 8;
        let mut scanner = TomlScanner::new("exactly8 = 1\n", limits);
        assert_eq!(TokenId::Key, scanner.next_token(true).unwrap());
        let mut scanner = TomlScanner::new("ninechars = 1\n", limits);
        let ex = scanner.next_token(true).unwrap_err();
        assert_eq!(E_TOML_KEY_TOO_LONG, ex.id());
    }

    #[test]
    fn string_length_cap() {
        let mut limits = TomlLimits::default();
        limits.max_string_len = 4;
        let mut scanner = TomlScanner::new("\"abcd\"\n", limits);
        assert_eq!(TokenId::Value, scanner.next_token(false).unwrap());
        let mut scanner = TomlScanner::new("\"abcde\"\n", limits);
        let ex = scanner.next_token(false).unwrap_err();
        assert_eq!(E_TOML_VALUE_TOO_LONG, ex.id());
    }

    #[test]
    fn datetime_conversions() {
        assert_eq!(to_naive_time("07:32:00.5").unwrap(),
                   NaiveTime::parse_from_str("07:32:00.500", "%T%.f").unwrap());
        assert!(to_naive_datetime("1979-05-27T07:32:00").is_ok());
        assert!(to_naive_datetime("1979-02-30T07:32:00").is_err());
        let utc = to_offset_datetime("1979-05-27T07:32:00Z").unwrap();
        let explicit = to_offset_datetime("1979-05-27T07:32:00+00:00").unwrap();
        assert_eq!(utc, explicit);
        let lower = to_offset_datetime("1979-05-27t07:32:00z").unwrap();
        assert_eq!(utc, lower);
    }

    #[test]
    fn calendar_validation() {
        // leap year rule is enforced by the value conversion
        let mut scanner = scanner_for("2000-02-29\n");
        scanner.next_token(false).unwrap();
        assert!(scanner.local_date_token_value().is_ok());
        let mut scanner = scanner_for("1900-02-29\n");
        scanner.next_token(false).unwrap();
        assert!(scanner.local_date_token_value().is_err());
        let mut scanner = scanner_for("2023-04-31\n");
        scanner.next_token(false).unwrap();
        assert!(scanner.local_date_token_value().is_err());
    }
}

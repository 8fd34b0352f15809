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

//! Structural limits for TOML processing.
//! All limits are enforced as validation errors, an input exceeding a limit is never truncated
//! silently.

/// Default maximum input size in bytes (1 GiB)
pub const DEFAULT_MAX_INPUT_SIZE: usize = 1 << 30;

/// Default maximum number of lines in an input document
pub const DEFAULT_MAX_LINES: usize = 1 << 24;

/// Default maximum length of a single key part in bytes
pub const DEFAULT_MAX_KEY_LEN: usize = 256;

/// Default maximum length of a value token in bytes
pub const DEFAULT_MAX_STRING_LEN: usize = 4096;

/// Default maximum number of keys under one table
pub const DEFAULT_MAX_SUBKEYS: usize = 1 << 17;

/// Default maximum number of elements in an array
pub const DEFAULT_MAX_ARRAY_LEN: usize = 1 << 17;

/// Structural limits applied when a TOML document is parsed.
/// A default instance is used by the plain parse functions, custom limits can be supplied
/// through the `_with_limits` variants of the public entry points.
#[derive (Clone, Copy, Debug, Eq, PartialEq)]
pub struct TomlLimits {
    /// maximum input size in bytes
    pub max_input_size: usize,
    /// maximum number of lines in an input document
    pub max_lines: usize,
    /// maximum length of a single key part in bytes
    pub max_key_len: usize,
    /// maximum length of a value token in bytes
    pub max_string_len: usize,
    /// maximum number of keys under one table
    pub max_subkeys: usize,
    /// maximum number of elements in an array
    pub max_array_len: usize
}
impl Default for TomlLimits {
    fn default() -> Self {
        TomlLimits {
            max_input_size: DEFAULT_MAX_INPUT_SIZE,
            max_lines: DEFAULT_MAX_LINES,
            max_key_len: DEFAULT_MAX_KEY_LEN,
            max_string_len: DEFAULT_MAX_STRING_LEN,
            max_subkeys: DEFAULT_MAX_SUBKEYS,
            max_array_len: DEFAULT_MAX_ARRAY_LEN
        }
    }
}

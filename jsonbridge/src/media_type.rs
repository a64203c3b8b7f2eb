/*
 * Copyright 2024 Thaddeus Treloar
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 *
 */

use std::{fmt::Display, str::FromStr};

use mime::Mime;

const WILDCARD: &str = "*";

/// The media type every JSON converter registers for.
pub const APPLICATION_JSON: MediaType = MediaType(mime::APPLICATION_JSON);

/// Matches any media type.
pub const ALL: MediaType = MediaType(mime::STAR_STAR);

#[derive(Debug, thiserror::Error)]
#[error("MediaTypeParseError: '{input}' is not a valid media type: {source}")]
pub struct MediaTypeParseError {
    input: String,
    source: mime::FromStrError,
}

/// A content-type tag such as `application/json`.
///
/// Matching ignores parameters, so `application/json; charset=utf-8` is
/// treated the same as `application/json` by [`MediaType::includes`] and
/// [`MediaType::is_compatible_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaType(Mime);

impl MediaType {
    pub fn parse(input: &str) -> Result<Self, MediaTypeParseError> {
        input.parse()
    }

    pub fn type_(&self) -> &str {
        self.0.type_().as_str()
    }

    pub fn subtype(&self) -> &str {
        self.0.subtype().as_str()
    }

    /// The structured syntax suffix, `json` for `application/problem+json`.
    pub fn suffix(&self) -> Option<&str> {
        self.0.suffix().map(|suffix| suffix.as_str())
    }

    pub fn charset(&self) -> Option<&str> {
        self.0.get_param(mime::CHARSET).map(|charset| charset.as_str())
    }

    pub fn is_wildcard_type(&self) -> bool {
        self.type_() == WILDCARD
    }

    pub fn is_wildcard_subtype(&self) -> bool {
        self.subtype() == WILDCARD
    }

    /// True for `*/*` and `application/*`, false for `application/*+json`.
    fn is_bare_wildcard_subtype(&self) -> bool {
        self.is_wildcard_subtype() && self.suffix().is_none()
    }

    /// A media type with no wildcard in either position.
    pub fn is_concrete(&self) -> bool {
        !self.is_wildcard_type() && !self.is_wildcard_subtype()
    }

    fn same_type(&self, other: &Self) -> bool {
        self.type_().eq_ignore_ascii_case(other.type_())
    }

    fn same_subtype(&self, other: &Self) -> bool {
        self.subtype().eq_ignore_ascii_case(other.subtype())
            && match (self.suffix(), other.suffix()) {
                (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
                (None, None) => true,
                _ => false,
            }
    }

    /// Whether this media type covers `other`.
    ///
    /// Not symmetric: `application/*` includes `application/json`, but not
    /// the other way round.
    pub fn includes(&self, other: &Self) -> bool {
        if self.is_wildcard_type() {
            return true;
        }

        if !self.same_type(other) {
            return false;
        }

        if self.same_subtype(other) || self.is_bare_wildcard_subtype() {
            return true;
        }

        // application/*+json includes application/problem+json
        match (self.is_wildcard_subtype(), self.suffix(), other.suffix()) {
            (true, Some(suffix), Some(other_suffix)) => suffix.eq_ignore_ascii_case(other_suffix),
            _ => false,
        }
    }

    /// Whether either media type covers the other. Symmetric.
    pub fn is_compatible_with(&self, other: &Self) -> bool {
        if self.is_wildcard_type() || other.is_wildcard_type() {
            return true;
        }

        if !self.same_type(other) {
            return false;
        }

        if self.same_subtype(other) {
            return true;
        }

        if self.is_bare_wildcard_subtype() || other.is_bare_wildcard_subtype() {
            return true;
        }

        Self::suffix_matches(self, other) || Self::suffix_matches(other, self)
    }

    // `wildcard` is of the form `type/*+suffix`
    fn suffix_matches(wildcard: &Self, other: &Self) -> bool {
        match (wildcard.is_wildcard_subtype(), wildcard.suffix()) {
            (true, Some(suffix)) => {
                suffix.eq_ignore_ascii_case(other.subtype())
                    || other
                        .suffix()
                        .is_some_and(|other_suffix| suffix.eq_ignore_ascii_case(other_suffix))
            }
            _ => false,
        }
    }

    pub fn as_mime(&self) -> &Mime {
        &self.0
    }

    pub fn into_mime(self) -> Mime {
        self.0
    }
}

impl FromStr for MediaType {
    type Err = MediaTypeParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        input
            .parse::<Mime>()
            .map(Self)
            .map_err(|source| MediaTypeParseError {
                input: input.to_owned(),
                source,
            })
    }
}

impl From<Mime> for MediaType {
    fn from(mime: Mime) -> Self {
        Self(mime)
    }
}

impl From<MediaType> for Mime {
    fn from(media_type: MediaType) -> Self {
        media_type.0
    }
}

impl Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Hierarchical path abstraction for the path component of a URI

use log::debug;
use std::fmt::Formatter;
use url::Url;

use crate::codec::{self, DecodeError, DELIMITER, DELIMITER_CHAR};

/// Error returned by [`HierarchicalPath`] operations
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Error when percent-decoding the path fails
    #[error("Error decoding path \"{}\": {}", path, source)]
    MalformedEncoding {
        /// The source path
        path: String,
        /// The underlying decode error
        source: DecodeError,
    },

    /// Error when a query or fragment delimiter leaks into the path slice
    #[error("Path \"{}\" contains a query or fragment delimiter", path)]
    InvalidPathSyntax {
        /// The source path
        path: String,
    },

    /// Error when an extension argument is malformed
    #[error(
        "Extension \"{}\" must not begin with a `.` or contain a path delimiter",
        extension
    )]
    InvalidExtensionSyntax {
        /// The rejected extension
        extension: String,
    },
}

impl From<std::convert::Infallible> for Error {
    fn from(error: std::convert::Infallible) -> Self {
        match error {}
    }
}

/// The path component of a URI, parsed into an ordered list of segments
///
/// A [`HierarchicalPath`] maintains the following invariants:
///
/// * Segments are stored in decoded form, in left-to-right path order
/// * A path is absolute iff its serialized form begins with [`DELIMITER`]
/// * A path ending in [`DELIMITER`] stores that trailing separator as a
///   final empty segment, never as a side flag
/// * Values are immutable: every transformation returns a new value
///
/// Interior empty segments (from `//` mid-path) are preserved as written;
/// [`HierarchicalPath::without_empty_segments`] removes them on request.
///
/// # Parse
///
/// A [`HierarchicalPath`] is parsed from the path slice of a URI, i.e. the
/// text between (and excluding) the authority and any query or fragment. A
/// literal `?` or `#` is therefore rejected, as is a malformed
/// percent-escape. Percent-escapes are decoded on construction and the
/// canonical encoding is restored on serialization.
///
/// ```
/// # use uri_path::path::HierarchicalPath;
/// let path = HierarchicalPath::parse("/report/file.txt").unwrap();
/// assert!(path.is_absolute());
/// assert_eq!(path.basename(), "file.txt");
/// assert_eq!(path.extension(), "txt");
/// assert_eq!(path.to_string(), "/report/file.txt");
///
/// HierarchicalPath::parse("/report?format=csv").unwrap_err();
/// HierarchicalPath::parse("/report%2").unwrap_err();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HierarchicalPath {
    /// The decoded segments, a trailing separator stored as a final empty segment
    segments: Vec<String>,
    /// Whether the serialized form begins with the delimiter
    is_absolute: bool,
}

impl HierarchicalPath {
    /// Parse a string as a [`HierarchicalPath`], returning an [`Error`] if
    /// invalid, as defined on the docstring for [`HierarchicalPath`]
    ///
    /// The leading separator determines [`HierarchicalPath::is_absolute`];
    /// a trailing separator becomes a final empty segment, so both survive
    /// serialization:
    ///
    /// ```
    /// # use uri_path::path::HierarchicalPath;
    /// assert_eq!(HierarchicalPath::parse("/a/b/").unwrap().to_string(), "/a/b/");
    /// assert_eq!(HierarchicalPath::parse("/a/b").unwrap().to_string(), "/a/b");
    /// ```
    pub fn parse(path: impl AsRef<str>) -> Result<Self, Error> {
        let path = path.as_ref();

        if path.contains(['?', '#']) {
            debug!("rejecting path {path:?}: query or fragment delimiter in path slice");
            return Err(Error::InvalidPathSyntax { path: path.into() });
        }

        let (is_absolute, stripped) = match path.strip_prefix(DELIMITER) {
            Some(stripped) => (true, stripped),
            None => (false, path),
        };
        let (stripped, trailing) = match stripped.strip_suffix(DELIMITER) {
            Some(stripped) => (stripped, true),
            None => (stripped, false),
        };

        let decoded = codec::decode_path(stripped).map_err(|source| {
            debug!("rejecting path {path:?}: {source}");
            Error::MalformedEncoding {
                path: path.into(),
                source,
            }
        })?;

        let mut segments: Vec<String> = decoded.split(DELIMITER_CHAR).map(String::from).collect();
        if trailing {
            segments.push(String::new());
        }

        Ok(Self {
            segments,
            is_absolute,
        })
    }

    /// Build a [`HierarchicalPath`] from decoded segments, bypassing parsing
    ///
    /// Intended for callers that already hold the segment list, e.g. the
    /// result of transforming another path. Segments are taken verbatim and
    /// not re-validated; an empty collection is stored as the single empty
    /// segment its serialization would parse back to. A leading empty
    /// segment on a relative path serializes ambiguously and is the
    /// caller's contract to avoid.
    pub fn from_segments<I, S>(segments: I, is_absolute: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            segments.push(String::new());
        }
        Self {
            segments,
            is_absolute,
        }
    }

    /// Parse the path slice of an already-composed [`Url`]
    ///
    /// The rest of the URL (scheme, authority, query, fragment) is owned by
    /// the URL type; only the path component is taken.
    ///
    /// ```
    /// # use uri_path::path::HierarchicalPath;
    /// # use url::Url;
    /// let url = Url::parse("https://example.com/report/file.txt?format=csv").unwrap();
    /// let path = HierarchicalPath::from_url(&url).unwrap();
    /// assert_eq!(path.to_string(), "/report/file.txt");
    /// ```
    pub fn from_url(url: &Url) -> Result<Self, Error> {
        Self::parse(url.path())
    }

    /// True if the serialized form begins with [`DELIMITER`]
    pub fn is_absolute(&self) -> bool {
        self.is_absolute
    }

    /// True if the path serializes to the empty string
    pub fn is_empty(&self) -> bool {
        !self.is_absolute && self.segments.len() <= 1 && self.segments.iter().all(|s| s.is_empty())
    }

    /// Returns the number of segments, counting a trailing empty segment
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Returns the decoded segments in path order
    pub fn segments(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.segments.iter().map(String::as_str)
    }

    /// Returns the segment at `index`, or `None` if out of range
    ///
    /// ```
    /// # use uri_path::path::HierarchicalPath;
    /// let path = HierarchicalPath::parse("/a/b").unwrap();
    /// assert_eq!(path.segment(1), Some("b"));
    /// assert_eq!(path.segment(9).unwrap_or("default"), "default");
    /// ```
    pub fn segment(&self, index: usize) -> Option<&str> {
        self.segments.get(index).map(String::as_str)
    }

    /// Returns the last segment verbatim
    ///
    /// Empty when the path is empty or ends in a separator.
    pub fn basename(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    /// Returns the parent directory of the serialized path
    ///
    /// The basename and its preceding separator are removed: a single
    /// leading separator survives for absolute paths, and a path without
    /// any separator has parent `.`.
    ///
    /// ```
    /// # use uri_path::path::HierarchicalPath;
    /// assert_eq!(HierarchicalPath::parse("/a/b").unwrap().dirname(), "/a");
    /// assert_eq!(HierarchicalPath::parse("/report/").unwrap().dirname(), "/report");
    /// assert_eq!(HierarchicalPath::parse("file.txt").unwrap().dirname(), ".");
    /// ```
    pub fn dirname(&self) -> String {
        let serialized = self.to_string();
        match serialized.rsplit_once(DELIMITER_CHAR) {
            None => String::from("."),
            Some(("", _)) => String::from(DELIMITER),
            Some((parent, _)) => {
                let parent = parent.trim_end_matches(DELIMITER_CHAR);
                match parent.is_empty() {
                    true => String::from(DELIMITER),
                    false => parent.to_string(),
                }
            }
        }
    }

    /// Returns the extension of the basename, or `""` if there is none
    ///
    /// A `;parameter` suffix on the basename is ignored, and a basename
    /// with no non-empty stem (e.g. `.gitignore`) has no extension.
    ///
    /// ```
    /// # use uri_path::path::HierarchicalPath;
    /// assert_eq!(HierarchicalPath::parse("/a/b.tar;type=a").unwrap().extension(), "tar");
    /// assert_eq!(HierarchicalPath::parse("/a/.gitignore").unwrap().extension(), "");
    /// ```
    pub fn extension(&self) -> &str {
        let basename = self.basename();
        let stem_and_extension = match basename.split_once(';') {
            Some((stem_and_extension, _)) => stem_and_extension,
            None => basename,
        };
        match stem_and_extension.rsplit_once('.') {
            Some(("", _)) | None => "",
            Some((_, extension)) => extension,
        }
    }

    /// True if the serialized form is non-empty and ends with [`DELIMITER`]
    pub fn has_trailing_slash(&self) -> bool {
        match self.segments.split_last() {
            Some((last, rest)) => last.is_empty() && (self.is_absolute || !rest.is_empty()),
            None => false,
        }
    }

    /// Returns a new path with `other`'s segments appended
    ///
    /// Accepts another [`HierarchicalPath`] or raw path text, which is
    /// parsed first and may fail like [`HierarchicalPath::parse`]. A
    /// trailing empty segment on the receiver is dropped before appending:
    /// appending continues the directory, it does not start below an empty
    /// segment. The result keeps the receiver's absolute/relative flag;
    /// `other`'s flag is ignored.
    ///
    /// ```
    /// # use uri_path::path::HierarchicalPath;
    /// let base = HierarchicalPath::parse("/x/y").unwrap();
    /// assert_eq!(base.append("z").unwrap().to_string(), "/x/y/z");
    ///
    /// let dir = HierarchicalPath::parse("/x/").unwrap();
    /// assert_eq!(dir.append("z").unwrap().to_string(), "/x/z");
    /// ```
    pub fn append<T>(&self, other: T) -> Result<Self, Error>
    where
        T: TryInto<Self>,
        Error: From<T::Error>,
    {
        let other = other.try_into()?;
        let mut segments = self.segments.clone();
        if segments.last().is_some_and(|s| s.is_empty()) {
            segments.pop();
        }
        segments.extend(other.segments);
        Ok(self.rebuild(segments))
    }

    /// Returns a new path with `other`'s segments placed first
    ///
    /// The mirror of [`HierarchicalPath::append`]: a trailing empty segment
    /// on `other` is dropped before merging, and the receiver's
    /// absolute/relative flag wins.
    pub fn prepend<T>(&self, other: T) -> Result<Self, Error>
    where
        T: TryInto<Self>,
        Error: From<T::Error>,
    {
        let mut segments = other.try_into()?.segments;
        if segments.last().is_some_and(|s| s.is_empty()) {
            segments.pop();
        }
        segments.extend(self.segments.iter().cloned());
        Ok(self.rebuild(segments))
    }

    /// Returns a new path with the segment at `index` replaced by
    /// `other`'s segments
    ///
    /// An out-of-range `index` returns the receiver unchanged. A trailing
    /// empty segment on `other` is dropped before splicing, so replacing
    /// with a bare `/` removes the segment.
    pub fn replace<T>(&self, index: usize, other: T) -> Result<Self, Error>
    where
        T: TryInto<Self>,
        Error: From<T::Error>,
    {
        let other = other.try_into()?;
        if index >= self.segments.len() {
            return Ok(self.clone());
        }

        let mut replacement = other.segments;
        if replacement.last().is_some_and(|s| s.is_empty()) {
            replacement.pop();
        }

        let mut segments = Vec::with_capacity(self.segments.len() + replacement.len());
        segments.extend_from_slice(&self.segments[..index]);
        segments.append(&mut replacement);
        segments.extend_from_slice(&self.segments[index + 1..]);

        if segments == self.segments {
            return Ok(self.clone());
        }
        Ok(self.rebuild(segments))
    }

    /// Returns a new path with the basename's extension replaced
    ///
    /// The basename is split on the first `;` into a stem-and-extension
    /// part and a parameter part; any existing extension is stripped from
    /// the former and `extension` (without a leading dot) takes its place,
    /// with the parameter suffix retained. An empty `extension` removes the
    /// extension.
    ///
    /// Two no-op cases return an equal value rather than failing: a path
    /// whose basename has no stem to attach an extension to, and a rebuild
    /// that reproduces the current basename.
    ///
    /// Fails with [`Error::InvalidExtensionSyntax`] if `extension` begins
    /// with a `.` or contains the path delimiter.
    ///
    /// ```
    /// # use uri_path::path::HierarchicalPath;
    /// let path = HierarchicalPath::parse("/a/b.tar;type=a").unwrap();
    /// assert_eq!(path.with_extension("gz").unwrap().basename(), "b.gz;type=a");
    /// assert_eq!(path.with_extension("").unwrap().basename(), "b;type=a");
    /// path.with_extension(".gz").unwrap_err();
    /// ```
    pub fn with_extension(&self, extension: impl AsRef<str>) -> Result<Self, Error> {
        let extension = extension.as_ref();
        if extension.starts_with('.') || extension.contains(DELIMITER_CHAR) {
            debug!("rejecting extension {extension:?}: leading dot or path delimiter");
            return Err(Error::InvalidExtensionSyntax {
                extension: extension.into(),
            });
        }

        let basename = match self.segments.last() {
            Some(basename) => basename,
            None => return Ok(self.clone()),
        };
        let (stem_and_extension, parameter) = match basename.split_once(';') {
            Some((stem_and_extension, parameter)) => (stem_and_extension, Some(parameter)),
            None => (basename.as_str(), None),
        };
        if stem_and_extension.is_empty() {
            return Ok(self.clone());
        }

        // a lone leading dot is part of the stem, not an extension
        let stem = match stem_and_extension.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => stem_and_extension,
        };

        let mut rebuilt = stem.to_string();
        let extension = extension.trim();
        if !extension.is_empty() {
            rebuilt.push('.');
            rebuilt.push_str(extension);
        }
        if let Some(parameter) = parameter.map(str::trim).filter(|p| !p.is_empty()) {
            rebuilt.push(';');
            rebuilt.push_str(parameter);
        }

        if rebuilt == *basename {
            return Ok(self.clone());
        }
        let mut segments = self.segments.clone();
        if let Some(last) = segments.last_mut() {
            *last = rebuilt;
        }
        Ok(Self {
            segments,
            is_absolute: self.is_absolute,
        })
    }

    /// Returns a new path whose serialized form ends with [`DELIMITER`]
    ///
    /// Already-terminated paths come back unchanged. The empty path gains
    /// its first and only separator, which makes it the root path `/`.
    pub fn with_trailing_slash(&self) -> Self {
        if self.has_trailing_slash() {
            return self.clone();
        }
        if self.is_empty() {
            return Self {
                segments: vec![String::new()],
                is_absolute: true,
            };
        }
        let mut segments = self.segments.clone();
        segments.push(String::new());
        Self {
            segments,
            is_absolute: self.is_absolute,
        }
    }

    /// Returns a new path whose serialized form does not end with
    /// [`DELIMITER`]
    ///
    /// The root path `/` loses its only separator and becomes the empty
    /// relative path.
    pub fn without_trailing_slash(&self) -> Self {
        if !self.has_trailing_slash() {
            return self.clone();
        }
        let mut segments = self.segments.clone();
        segments.pop();
        if segments.is_empty() {
            return Self {
                segments: vec![String::new()],
                is_absolute: false,
            };
        }
        Self {
            segments,
            is_absolute: self.is_absolute,
        }
    }

    /// Returns this path as an absolute path
    pub fn with_leading_slash(&self) -> Self {
        Self {
            segments: self.segments.clone(),
            is_absolute: true,
        }
    }

    /// Returns this path as a relative path
    pub fn without_leading_slash(&self) -> Self {
        Self {
            segments: self.segments.clone(),
            is_absolute: false,
        }
    }

    /// Returns a new path with `.` and `..` segments resolved
    ///
    /// A `.` segment is dropped and a `..` segment removes the segment
    /// before it. `..` never unroots an absolute path: the flag is
    /// untouched and popping stops at the first segment. A path whose last
    /// segment was `.` or `..` keeps a trailing separator, since it named a
    /// directory.
    ///
    /// ```
    /// # use uri_path::path::HierarchicalPath;
    /// let path = HierarchicalPath::parse("/.././report/").unwrap();
    /// assert_eq!(path.without_dot_segments().to_string(), "/report/");
    /// ```
    pub fn without_dot_segments(&self) -> Self {
        if !self.segments.iter().any(|s| s == "." || s == "..") {
            return self.clone();
        }

        let mut segments: Vec<String> = Vec::with_capacity(self.segments.len());
        for segment in &self.segments {
            match segment.as_str() {
                ".." => {
                    segments.pop();
                }
                "." => {}
                _ => segments.push(segment.clone()),
            }
        }
        if matches!(self.segments.last().map(String::as_str), Some("." | "..")) {
            segments.push(String::new());
        }
        self.rebuild(segments)
    }

    /// Returns a new path with interior empty segments removed
    ///
    /// Duplicated separators collapse to one; a trailing separator is kept.
    pub fn without_empty_segments(&self) -> Self {
        if !self.segments.iter().any(|s| s.is_empty()) {
            return self.clone();
        }
        let trailing = self.has_trailing_slash();
        let mut segments: Vec<String> = self
            .segments
            .iter()
            .filter(|s| !s.is_empty())
            .cloned()
            .collect();
        if trailing {
            segments.push(String::new());
        }
        self.rebuild(segments)
    }

    /// Rebuild a value around transformed segments, keeping the receiver's
    /// flag and restoring the one-empty-segment floor of the parsed form
    fn rebuild(&self, mut segments: Vec<String>) -> Self {
        if segments.is_empty() {
            segments.push(String::new());
        }
        Self {
            segments,
            is_absolute: self.is_absolute,
        }
    }
}

impl std::fmt::Display for HierarchicalPath {
    /// Serialize to canonical path text: segments joined with
    /// [`DELIMITER`], percent-encoded, a leading [`DELIMITER`] iff the
    /// path is absolute. The exact inverse of [`HierarchicalPath::parse`]
    /// for canonically encoded input.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_absolute {
            f.write_str(DELIMITER)?;
        }
        f.write_str(&codec::encode_path(&self.segments.join(DELIMITER)))
    }
}

impl std::str::FromStr for HierarchicalPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for HierarchicalPath {
    type Error = Error;

    fn try_from(path: &str) -> Result<Self, Self::Error> {
        Self::parse(path)
    }
}

impl TryFrom<String> for HierarchicalPath {
    type Error = Error;

    fn try_from(path: String) -> Result<Self, Self::Error> {
        Self::parse(path)
    }
}

impl From<&HierarchicalPath> for HierarchicalPath {
    fn from(path: &HierarchicalPath) -> Self {
        path.clone()
    }
}

/// Build a relative path from decoded segments
impl<S: Into<String>> FromIterator<S> for HierarchicalPath {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::from_segments(iter, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_on_delimiter() {
        assert_eq!(
            path("a/b/c").segments().collect::<Vec<_>>(),
            ["a", "b", "c"]
        );
        assert_eq!(path("/a/b").segments().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(
            path("file.txt").segments().collect::<Vec<_>>(),
            ["file.txt"]
        );
    }

    #[test]
    fn parse_empty_path() {
        let empty = path("");
        assert!(!empty.is_absolute());
        assert!(empty.is_empty());
        assert_eq!(empty.segments().collect::<Vec<_>>(), [""]);
        assert_eq!(empty.to_string(), "");
        assert_eq!(empty.basename(), "");
    }

    #[test]
    fn parse_root_path() {
        let root = path("/");
        assert!(root.is_absolute());
        assert!(!root.is_empty());
        assert_eq!(root.segments().collect::<Vec<_>>(), [""]);
        assert_eq!(root.to_string(), "/");
    }

    #[test]
    fn parse_detects_absolute_and_relative() {
        assert!(path("/a/b").is_absolute());
        assert!(!path("a/b").is_absolute());
        assert!(!path("../report/file.txt").is_absolute());
    }

    #[test]
    fn parse_keeps_trailing_separator_as_empty_segment() {
        let report = path("/report/");
        assert_eq!(report.segments().collect::<Vec<_>>(), ["report", ""]);
        assert!(report.is_absolute());
        assert_eq!(report.basename(), "");
        assert_eq!(report.dirname(), "/report");
    }

    #[test]
    fn parse_keeps_interior_empty_segments() {
        assert_eq!(path("a//b").segments().collect::<Vec<_>>(), ["a", "", "b"]);
        assert_eq!(path("//").segments().collect::<Vec<_>>(), ["", ""]);
        assert_eq!(path("//").to_string(), "//");
    }

    #[test]
    fn parse_decodes_segments() {
        assert_eq!(path("a%20b/c").segments().collect::<Vec<_>>(), ["a b", "c"]);
        assert_eq!(path("caf%C3%A9").basename(), "café");
        // an escaped delimiter does not create a segment boundary
        assert_eq!(path("a%2Fb").segments().collect::<Vec<_>>(), ["a%2Fb"]);
    }

    #[test]
    fn parse_rejects_query_and_fragment_delimiters() {
        let err = HierarchicalPath::parse("/report?format=csv").unwrap_err();
        assert!(matches!(err, Error::InvalidPathSyntax { .. }));

        let err = HierarchicalPath::parse("/report#top").unwrap_err();
        assert!(matches!(err, Error::InvalidPathSyntax { .. }));
    }

    #[test]
    fn parse_rejects_malformed_escapes() {
        let err = HierarchicalPath::parse("/report%2").unwrap_err();
        assert!(matches!(err, Error::MalformedEncoding { .. }));

        let err = HierarchicalPath::parse("/repo%zzrt").unwrap_err();
        assert!(matches!(err, Error::MalformedEncoding { .. }));
    }

    #[test]
    fn round_trip_canonical_paths() {
        for raw in [
            "",
            "/",
            "//",
            "a",
            "/a",
            "a/",
            "/a/b",
            "/a/b/",
            "a//b",
            "../report/file.txt",
            "/a%20b/c",
            "a%2Fb/c",
            "/caf%C3%A9",
        ] {
            assert_eq!(path(raw).to_string(), raw, "{raw:?} did not round-trip");
        }
    }

    #[test]
    fn serialization_normalizes_encoding() {
        // decoded on parse, canonically re-encoded on serialization
        assert_eq!(path("a%41b").to_string(), "aAb");
        assert_eq!(
            HierarchicalPath::from_segments(["a b"], true).to_string(),
            "/a%20b"
        );
    }

    #[test]
    fn from_segments_bypasses_parsing() {
        let built = HierarchicalPath::from_segments(["report", ""], true);
        assert_eq!(built, path("/report/"));

        let relative = HierarchicalPath::from_segments(["..", "a b"], false);
        assert_eq!(relative.to_string(), "../a%20b");
    }

    #[test]
    fn from_segments_floors_empty_collection() {
        let built = HierarchicalPath::from_segments(Vec::<String>::new(), true);
        assert_eq!(built, path("/"));
        assert_eq!(built.to_string(), "/");

        let built: HierarchicalPath = std::iter::empty::<&str>().collect();
        assert_eq!(built, path(""));
    }

    #[test]
    fn from_iter_builds_relative_paths() {
        let built: HierarchicalPath = ["a", "b"].into_iter().collect();
        assert_eq!(built.to_string(), "a/b");
        assert!(!built.is_absolute());
    }

    #[test]
    fn from_url_takes_the_path_slice() {
        let url = Url::parse("https://example.com/report/file.txt?format=csv#top").unwrap();
        let path = HierarchicalPath::from_url(&url).unwrap();
        assert!(path.is_absolute());
        assert_eq!(path.to_string(), "/report/file.txt");
    }

    #[test]
    fn segment_lookup() {
        let path = path("/a/b/c");
        assert_eq!(path.segment(0), Some("a"));
        assert_eq!(path.segment(2), Some("c"));
        assert_eq!(path.segment(3), None);
        assert_eq!(path.segment(9).unwrap_or("default"), "default");
        assert_eq!(path.segment_count(), 3);
    }

    #[test]
    fn basename_is_the_last_segment() {
        assert_eq!(path("/a/file.txt").basename(), "file.txt");
        assert_eq!(path("file.txt").basename(), "file.txt");
        assert_eq!(path("/a/").basename(), "");
        assert_eq!(path("").basename(), "");
    }

    #[test]
    fn dirname_removes_the_basename() {
        assert_eq!(path("/a/b/c").dirname(), "/a/b");
        assert_eq!(path("/report/").dirname(), "/report");
        assert_eq!(path("/a").dirname(), "/");
        assert_eq!(path("/").dirname(), "/");
        assert_eq!(path("a/b").dirname(), "a");
        assert_eq!(path("file.txt").dirname(), ".");
        assert_eq!(path("").dirname(), ".");
        // no trailing separator in the result
        assert_eq!(path("/a//").dirname(), "/a");
    }

    #[test]
    fn extension_of_the_basename() {
        assert_eq!(path("/a/file.txt").extension(), "txt");
        assert_eq!(path("archive.tar.gz").extension(), "gz");
        assert_eq!(path("/a/b.tar;type=a").extension(), "tar");
        assert_eq!(path("/a/file").extension(), "");
        assert_eq!(path("/a/file.").extension(), "");
        assert_eq!(path("/a/.gitignore").extension(), "");
        assert_eq!(path("/a/").extension(), "");
        assert_eq!(path("").extension(), "");
    }

    #[test]
    fn append_concatenates_segments() {
        assert_eq!(path("/x/y").append("z").unwrap().to_string(), "/x/y/z");
        assert_eq!(path("x").append("y/z").unwrap().to_string(), "x/y/z");
        assert_eq!(path("").append("z").unwrap().to_string(), "z");
    }

    #[test]
    fn append_drops_the_trailing_marker_first() {
        assert_eq!(path("/x/").append("z").unwrap().to_string(), "/x/z");
        // only the trailing marker, interior empties survive
        assert_eq!(path("/x//y/").append("z").unwrap().to_string(), "/x//y/z");
        // appending a directory keeps its trailing separator
        assert_eq!(path("/x").append("y/").unwrap().to_string(), "/x/y/");
    }

    #[test]
    fn append_keeps_the_receivers_flag() {
        let appended = path("/x").append("/y").unwrap();
        assert!(appended.is_absolute());
        assert_eq!(appended.to_string(), "/x/y");

        let appended = path("x").append("/y").unwrap();
        assert!(!appended.is_absolute());
        assert_eq!(appended.to_string(), "x/y");
    }

    #[test]
    fn append_accepts_paths_and_text() {
        let other = path("b/c");
        assert_eq!(path("/a").append(&other).unwrap().to_string(), "/a/b/c");
        assert_eq!(path("/a").append(other).unwrap().to_string(), "/a/b/c");
        assert_eq!(
            path("/a").append(String::from("b/c")).unwrap().to_string(),
            "/a/b/c"
        );
    }

    #[test]
    fn append_propagates_parse_errors() {
        let err = path("/a").append("b%2").unwrap_err();
        assert!(matches!(err, Error::MalformedEncoding { .. }));
    }

    #[test]
    fn prepend_places_other_first() {
        assert_eq!(
            path("report").prepend("shop").unwrap().to_string(),
            "shop/report"
        );
        assert_eq!(
            path("/report").prepend("shop/").unwrap().to_string(),
            "/shop/report"
        );
        assert_eq!(path("/report").prepend("").unwrap().to_string(), "/report");
    }

    #[test]
    fn replace_splices_segments() {
        assert_eq!(
            path("/a/b/c").replace(1, "x/y").unwrap().to_string(),
            "/a/x/y/c"
        );
        // out of range leaves the value unchanged
        assert_eq!(path("/a/b").replace(5, "x").unwrap(), path("/a/b"));
        // replacing with the root removes the segment
        assert_eq!(path("/a/b/c").replace(1, "/").unwrap().to_string(), "/a/c");
    }

    #[test]
    fn with_extension_replaces_the_extension() {
        assert_eq!(
            path("/a/file.txt")
                .with_extension("csv")
                .unwrap()
                .to_string(),
            "/a/file.csv"
        );
        assert_eq!(
            path("/a/file").with_extension("csv").unwrap().to_string(),
            "/a/file.csv"
        );
        assert_eq!(
            path("/a/file.txt").with_extension("").unwrap().to_string(),
            "/a/file"
        );
    }

    #[test]
    fn with_extension_keeps_the_parameter_suffix() {
        let rebuilt = path("/a/b.tar;param").with_extension("gz").unwrap();
        assert_eq!(rebuilt.basename(), "b.gz;param");
        assert_eq!(rebuilt.to_string(), "/a/b.gz;param");
    }

    #[test]
    fn with_extension_no_op_cases() {
        // empty basename: nothing to attach an extension to
        assert_eq!(path("/a/").with_extension("txt").unwrap(), path("/a/"));
        assert_eq!(path("").with_extension("txt").unwrap(), path(""));
        // identical rebuild short-circuits
        assert_eq!(
            path("/a/file.txt").with_extension("txt").unwrap(),
            path("/a/file.txt")
        );
        // a dotfile's name is its stem, not an extension
        assert_eq!(
            path("/a/.gitignore").with_extension("").unwrap(),
            path("/a/.gitignore")
        );
    }

    #[test]
    fn with_extension_rejects_bad_arguments() {
        let err = path("/a/file.txt").with_extension(".csv").unwrap_err();
        assert!(matches!(err, Error::InvalidExtensionSyntax { .. }));

        let err = path("/a/file.txt").with_extension("a/b").unwrap_err();
        assert!(matches!(err, Error::InvalidExtensionSyntax { .. }));
    }

    #[test]
    fn extension_change_is_idempotent() {
        for raw in [
            "/a/file.txt",
            "/a/file",
            "/a/b.tar;param",
            "/a/",
            "",
            ".gitignore",
        ] {
            let value = path(raw);
            let rebuilt = value.with_extension(value.extension()).unwrap();
            assert_eq!(rebuilt.to_string(), value.to_string(), "{raw:?}");
        }
    }

    #[test]
    fn trailing_slash_toggles() {
        assert!(path("/a/").has_trailing_slash());
        assert!(path("/").has_trailing_slash());
        assert!(!path("/a").has_trailing_slash());
        assert!(!path("").has_trailing_slash());

        assert_eq!(path("/a").with_trailing_slash().to_string(), "/a/");
        assert_eq!(path("/a/").with_trailing_slash().to_string(), "/a/");
        assert_eq!(path("").with_trailing_slash().to_string(), "/");

        assert_eq!(path("/a/").without_trailing_slash().to_string(), "/a");
        assert_eq!(path("/a").without_trailing_slash().to_string(), "/a");
        let unrooted = path("/").without_trailing_slash();
        assert_eq!(unrooted.to_string(), "");
        assert!(!unrooted.is_absolute());
    }

    #[test]
    fn leading_slash_toggles() {
        assert_eq!(path("a/b").with_leading_slash().to_string(), "/a/b");
        assert_eq!(path("/a/b").with_leading_slash(), path("/a/b"));
        assert_eq!(path("/a/b").without_leading_slash().to_string(), "a/b");
        assert_eq!(path("").with_leading_slash().to_string(), "/");
    }

    #[test]
    fn dot_segment_removal() {
        assert_eq!(path("/a/b/../c").without_dot_segments().to_string(), "/a/c");
        assert_eq!(path("/a/./b").without_dot_segments().to_string(), "/a/b");
        assert_eq!(
            path("/.././report/").without_dot_segments().to_string(),
            "/report/"
        );
        // a final dot segment names a directory
        assert_eq!(path("a/b/..").without_dot_segments().to_string(), "a/");
        assert_eq!(path("a/.").without_dot_segments().to_string(), "a/");
        // `..` never unroots an absolute path
        let resolved = path("/../a").without_dot_segments();
        assert!(resolved.is_absolute());
        assert_eq!(resolved.to_string(), "/a");
        assert_eq!(path("/a/..").without_dot_segments().to_string(), "/");
    }

    #[test]
    fn empty_segment_removal() {
        assert_eq!(path("/a//b/").without_empty_segments().to_string(), "/a/b/");
        assert_eq!(path("a//b").without_empty_segments().to_string(), "a/b");
        assert_eq!(path("//").without_empty_segments().to_string(), "/");
        assert_eq!(path("/a/b").without_empty_segments(), path("/a/b"));
    }

    #[test]
    fn transformations_never_mutate_the_receiver() {
        let original = path("/a/b.tar;param/");
        let snapshot = original.clone();

        let _ = original.append("z").unwrap();
        let _ = original.prepend("z").unwrap();
        let _ = original.replace(0, "z").unwrap();
        let _ = original.with_extension("gz").unwrap();
        let _ = original.without_trailing_slash();
        let _ = original.without_leading_slash();
        let _ = original.without_dot_segments();
        let _ = original.without_empty_segments();

        assert_eq!(original, snapshot);
    }

    #[test]
    fn display_parses_back_to_an_equal_value() {
        for raw in ["", "/", "a/b/", "/a%20b/c", "../x"] {
            let value = path(raw);
            assert_eq!(path(&value.to_string()), value);
        }
    }

    #[test]
    fn from_str_parses() {
        let parsed: HierarchicalPath = "/a/b".parse().unwrap();
        assert_eq!(parsed, path("/a/b"));
        assert!("bad%".parse::<HierarchicalPath>().is_err());
    }

    /// Construct a [`HierarchicalPath`] from a raw `&str`, or panic trying.
    #[track_caller]
    fn path(raw: &str) -> HierarchicalPath {
        HierarchicalPath::parse(raw).unwrap()
    }
}

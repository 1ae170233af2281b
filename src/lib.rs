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

//! # uri-path
//!
//! The hierarchical path component of a URI as an immutable value type.
//!
//! [`HierarchicalPath`] parses the path slice of a URI-like string into an
//! ordered sequence of percent-decoded segments, keeps track of whether the
//! path is absolute, and represents a trailing separator as a final empty
//! segment, so the original text is recovered losslessly by serialization.
//! All transformations return new values; existing values never change.
//!
//! The percent-encoding rules live in the free-standing [`codec`] module,
//! shared by any component type that carries path-encoded text.
//!
//! Scheme, authority, query and fragment handling belong to whatever
//! composes whole URIs (e.g. the [`url`] crate); this crate only receives
//! and produces the slice between the authority and the query or fragment
//! delimiters.
//!
//! ```
//! use uri_path::HierarchicalPath;
//!
//! let path = HierarchicalPath::parse("/.././report/").unwrap();
//! assert!(path.is_absolute());
//! assert_eq!(path.segments().collect::<Vec<_>>(), ["..", ".", "report", ""]);
//!
//! let resolved = path.without_dot_segments();
//! assert_eq!(resolved.to_string(), "/report/");
//!
//! let file = resolved.append("summary.tar").unwrap().with_extension("gz").unwrap();
//! assert_eq!(file.to_string(), "/report/summary.gz");
//! ```

#![warn(missing_docs)]

pub mod codec;
pub mod path;

pub use codec::DELIMITER;
pub use path::{Error, HierarchicalPath};

//! Regex-driven structural extraction of PHP declarations.
//!
//! The extractor runs a handful of independent pattern passes over the whole
//! file text. It has no tokenizer and no notion of nesting: the members of a
//! declaration are whatever the member patterns find between that
//! declaration's opening brace and the next declaration of the same kind (or
//! the end of the file). Doc-comments are attributed by looking backwards for
//! the closest `/**` block, see [`docblock_before`].
//!
//! # Example
//!
//! ```
//! use phpdoc_from_source::extractor::extract;
//!
//! let source = r#"<?php
//! /** Order status. */
//! enum Status: string {
//!     case Open = 'open';
//!     case Closed = 'closed';
//! }
//! "#;
//!
//! let extracted = extract(source);
//! assert_eq!(extracted.enums[0].cases.len(), 2);
//! assert_eq!(extracted.enums[0].backing_type.as_deref(), Some("string"));
//! ```

use crate::model::{
    CaseDoc, ClassDoc, ConstantDoc, EnumDoc, ExtractedSource, FunctionDoc, InterfaceDoc,
    MethodDoc, PropertyDoc,
};
use log::debug;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::ops::Range;

static CLASS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bclass\s+(\w+)(?:\s+extends\s+([\w\\]+))?(?:\s+implements\s+([^{]+?))?\s*\{")
        .unwrap()
});

static INTERFACE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\binterface\s+(\w+)(?:\s+extends\s+([^{]+?))?\s*\{").unwrap()
});

static ENUM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\benum\s+(\w+)(?:\s*:\s*(\w+))?(?:\s+implements\s+[^{]+?)?\s*\{").unwrap()
});

/// Modifiers are all optional, so `static function` and `abstract function`
/// match without a visibility keyword. Interface and abstract methods end in `;`.
static METHOD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:\b(?:public|private|protected|static|abstract|final)\s+)*\bfunction\s+&?(\w+)\s*\([^)]*\)\s*(?::\s*([?\w\\|]+))?\s*[{;]",
    )
    .unwrap()
});

/// At least one modifier is required; a bare `$x = 1;` is a local variable.
static PROPERTY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:(?:public|private|protected|var|static|readonly)\s+)+(?:[?\w\\|]+\s+)?\$(\w+)\s*(?:=\s*[^;]+)?;",
    )
    .unwrap()
});

static CASE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bcase\s+(\w+)\s*(?:=\s*[^,;]+)?[,;]").unwrap());

static FUNCTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^function\s+&?(\w+)\s*\([^)]*\)\s*(?::\s*([?\w\\|]+))?\s*\{").unwrap()
});

static CONSTANT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)^(?:const\s+(\w+)\s*=|define\(\s*['"](\w+)['"])"#).unwrap()
});

/// Extracts every class, interface, enum, top-level function and top-level
/// constant from PHP source text.
///
/// The returned declarations carry an empty `source` path; callers that know
/// the file name set it with [`ExtractedSource::set_source`].
pub fn extract(source: &str) -> ExtractedSource {
    let result = ExtractedSource {
        classes: extract_classes(source),
        interfaces: extract_interfaces(source),
        enums: extract_enums(source),
        functions: extract_functions(source),
        constants: extract_constants(source),
    };

    debug!(
        "Extracted {} classes, {} interfaces, {} enums, {} functions, {} constants",
        result.classes.len(),
        result.interfaces.len(),
        result.enums.len(),
        result.functions.len(),
        result.constants.len()
    );

    result
}

/// Returns the closest `/** ... */` block that opens before `position`.
///
/// The block is returned verbatim, delimiters included. Nothing checks what
/// lies between the block and `position`, so a comment written for an earlier
/// entity is picked up when no nearer `/**` exists. Returns `None` when there
/// is no `/**` before the position or the block is never closed.
pub fn docblock_before(source: &str, position: usize) -> Option<&str> {
    let start = source.get(..position)?.rfind("/**")?;
    let end = source[start..].find("*/")?;
    Some(&source[start..start + end + 2])
}

/// A declaration header match: where it starts, where its body starts, and
/// the captures of the header.
struct HeaderMatch<'s> {
    start: usize,
    brace: usize,
    captures: Captures<'s>,
}

/// Runs a declaration pattern and pairs every match with the span its
/// members are searched in: from its opening brace to the start of the next
/// match of the same pattern, or the end of the text.
fn declarations<'s>(pattern: &Regex, source: &'s str) -> Vec<(HeaderMatch<'s>, Range<usize>)> {
    let headers: Vec<HeaderMatch<'s>> = pattern
        .captures_iter(source)
        .filter_map(|captures| {
            let whole = captures.get(0)?;
            Some(HeaderMatch {
                start: whole.start(),
                // every header pattern ends with the opening brace
                brace: whole.end() - 1,
                captures,
            })
        })
        .collect();

    let ends: Vec<usize> = headers
        .iter()
        .skip(1)
        .map(|h| h.start)
        .chain(std::iter::once(source.len()))
        .collect();

    headers
        .into_iter()
        .zip(ends)
        .map(|(header, end)| {
            let body = header.brace..end.max(header.brace);
            (header, body)
        })
        .collect()
}

fn extract_classes(source: &str) -> Vec<ClassDoc> {
    declarations(&CLASS_RE, source)
        .into_iter()
        .filter_map(|(header, body)| {
            let name = header.captures.get(1)?.as_str().to_string();
            Some(ClassDoc {
                name,
                docstring: doc_at(source, header.start),
                source: Default::default(),
                extends: header.captures.get(2).map(|m| m.as_str().to_string()),
                implements: header
                    .captures
                    .get(3)
                    .map(|m| split_names(m.as_str()))
                    .unwrap_or_default(),
                methods: extract_methods(source, body.clone()),
                properties: extract_properties(source, body),
            })
        })
        .collect()
}

fn extract_interfaces(source: &str) -> Vec<InterfaceDoc> {
    declarations(&INTERFACE_RE, source)
        .into_iter()
        .filter_map(|(header, body)| {
            let name = header.captures.get(1)?.as_str().to_string();
            Some(InterfaceDoc {
                name,
                docstring: doc_at(source, header.start),
                source: Default::default(),
                extends: header
                    .captures
                    .get(2)
                    .map(|m| split_names(m.as_str()))
                    .unwrap_or_default(),
                methods: extract_methods(source, body),
            })
        })
        .collect()
}

fn extract_enums(source: &str) -> Vec<EnumDoc> {
    declarations(&ENUM_RE, source)
        .into_iter()
        .filter_map(|(header, body)| {
            let name = header.captures.get(1)?.as_str().to_string();
            Some(EnumDoc {
                name,
                docstring: doc_at(source, header.start),
                source: Default::default(),
                backing_type: header.captures.get(2).map(|m| m.as_str().to_string()),
                cases: extract_cases(source, body),
            })
        })
        .collect()
}

fn extract_methods(source: &str, body: Range<usize>) -> Vec<MethodDoc> {
    members(&METHOD_RE, source, body, |captures, position| {
        Some(MethodDoc {
            name: captures.get(1)?.as_str().to_string(),
            return_type: captures.get(2).map(|m| m.as_str().to_string()),
            docstring: doc_at(source, position),
        })
    })
}

fn extract_properties(source: &str, body: Range<usize>) -> Vec<PropertyDoc> {
    members(&PROPERTY_RE, source, body, |captures, position| {
        Some(PropertyDoc {
            name: captures.get(1)?.as_str().to_string(),
            docstring: doc_at(source, position),
        })
    })
}

fn extract_cases(source: &str, body: Range<usize>) -> Vec<CaseDoc> {
    // the assigned value is matched only so it can be skipped
    members(&CASE_RE, source, body, |captures, position| {
        Some(CaseDoc {
            name: captures.get(1)?.as_str().to_string(),
            docstring: doc_at(source, position),
        })
    })
}

fn extract_functions(source: &str) -> Vec<FunctionDoc> {
    FUNCTION_RE
        .captures_iter(source)
        .filter_map(|captures| {
            let position = captures.get(0)?.start();
            Some(FunctionDoc {
                name: captures.get(1)?.as_str().to_string(),
                return_type: captures.get(2).map(|m| m.as_str().to_string()),
                docstring: doc_at(source, position),
            })
        })
        .collect()
}

fn extract_constants(source: &str) -> Vec<ConstantDoc> {
    CONSTANT_RE
        .captures_iter(source)
        .filter_map(|captures| {
            let position = captures.get(0)?.start();
            let name = captures.get(1).or_else(|| captures.get(2))?;
            Some(ConstantDoc {
                name: name.as_str().to_string(),
                docstring: doc_at(source, position),
            })
        })
        .collect()
}

/// Runs a member pattern over `body` and builds one entry per match.
///
/// `build` receives the match position in the full text so the doc-comment
/// lookup sees comments outside the body slice too.
fn members<'s, T>(
    pattern: &Regex,
    source: &'s str,
    body: Range<usize>,
    build: impl Fn(&Captures<'s>, usize) -> Option<T>,
) -> Vec<T> {
    let offset = body.start;
    pattern
        .captures_iter(&source[body])
        .filter_map(|captures| {
            let position = offset + captures.get(0)?.start();
            build(&captures, position)
        })
        .collect()
}

fn doc_at(source: &str, position: usize) -> Option<String> {
    docblock_before(source, position).map(str::to_string)
}

/// Splits a comma-separated name list such as `Countable, \ArrayAccess`.
fn split_names(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

//! Structural documentation model for a single PHP source file.
//!
//! Everything here is built during one extraction sweep over a file's text and
//! handed straight to the renderer. There is no cross-file identity: two files
//! declaring the same class name produce two unrelated [`Declaration`]s.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Everything the extractor found in one file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedSource {
    /// Classes, in source order
    pub classes: Vec<ClassDoc>,
    /// Interfaces, in source order
    pub interfaces: Vec<InterfaceDoc>,
    /// Enums, in source order
    pub enums: Vec<EnumDoc>,
    /// Top-level functions declared at column 0
    pub functions: Vec<FunctionDoc>,
    /// Top-level constants (`const` or `define`) declared at column 0
    pub constants: Vec<ConstantDoc>,
}

impl ExtractedSource {
    /// Number of class, interface and enum declarations.
    pub fn declaration_count(&self) -> usize {
        self.classes.len() + self.interfaces.len() + self.enums.len()
    }

    /// Whether the file has no declarations and no top-level members.
    pub fn is_empty(&self) -> bool {
        self.declaration_count() == 0 && self.functions.is_empty() && self.constants.is_empty()
    }

    /// Records the file every declaration came from.
    pub fn set_source(&mut self, path: &Path) {
        for class in &mut self.classes {
            class.source = path.to_path_buf();
        }
        for interface in &mut self.interfaces {
            interface.source = path.to_path_buf();
        }
        for decl in &mut self.enums {
            decl.source = path.to_path_buf();
        }
    }

    /// Consumes the result and yields its declarations: classes first, then
    /// interfaces, then enums, each group in source order.
    ///
    /// This is the order pages are written in, which matters when several
    /// declarations share one output path.
    pub fn into_declarations(self) -> Vec<Declaration> {
        let mut declarations = Vec::with_capacity(self.declaration_count());
        declarations.extend(self.classes.into_iter().map(Declaration::Class));
        declarations.extend(self.interfaces.into_iter().map(Declaration::Interface));
        declarations.extend(self.enums.into_iter().map(Declaration::Enum));
        declarations
    }
}

/// A top-level named unit with a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    Class(ClassDoc),
    Interface(InterfaceDoc),
    Enum(EnumDoc),
}

impl Declaration {
    /// The declared identifier.
    pub fn name(&self) -> &str {
        match self {
            Declaration::Class(c) => &c.name,
            Declaration::Interface(i) => &i.name,
            Declaration::Enum(e) => &e.name,
        }
    }

    /// Human-readable kind, used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Declaration::Class(_) => "class",
            Declaration::Interface(_) => "interface",
            Declaration::Enum(_) => "enum",
        }
    }
}

/// A `class` declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDoc {
    pub name: String,
    /// Raw doc-comment, delimiters included
    pub docstring: Option<String>,
    /// Path of the file the class was found in
    pub source: PathBuf,
    /// Parent class named after `extends`
    pub extends: Option<String>,
    /// Interfaces named after `implements`, in written order
    pub implements: Vec<String>,
    pub methods: Vec<MethodDoc>,
    pub properties: Vec<PropertyDoc>,
}

/// An `interface` declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceDoc {
    pub name: String,
    pub docstring: Option<String>,
    pub source: PathBuf,
    /// Parent interfaces named after `extends`
    pub extends: Vec<String>,
    pub methods: Vec<MethodDoc>,
}

/// An `enum` declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumDoc {
    pub name: String,
    pub docstring: Option<String>,
    pub source: PathBuf,
    /// Scalar type after the colon in `enum Status: string`
    pub backing_type: Option<String>,
    pub cases: Vec<CaseDoc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDoc {
    pub name: String,
    /// Declared return type, as written (`?string`, `self`, `int|false`)
    pub return_type: Option<String>,
    pub docstring: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDoc {
    /// Property name without the leading `$`
    pub name: String,
    pub docstring: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseDoc {
    pub name: String,
    pub docstring: Option<String>,
}

/// A function declared outside any class body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDoc {
    pub name: String,
    pub return_type: Option<String>,
    pub docstring: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantDoc {
    pub name: String,
    pub docstring: Option<String>,
}

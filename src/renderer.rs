//! Markdown rendering of extracted declarations.
//!
//! Rendering is a pure function of the extracted model: no I/O happens here.
//! Each page starts with a `#` heading, and every block (paragraph, label
//! line, heading) is followed by exactly one blank line, which is the layout
//! MkDocs expects.

use crate::model::{
    CaseDoc, ClassDoc, ConstantDoc, Declaration, EnumDoc, FunctionDoc, InterfaceDoc, MethodDoc,
    PropertyDoc,
};

/// Renders one declaration as a complete markdown page.
///
/// # Example
///
/// ```
/// use phpdoc_from_source::model::{ClassDoc, Declaration};
/// use phpdoc_from_source::renderer::render;
///
/// let class = ClassDoc {
///     name: "User".to_string(),
///     extends: Some("Model".to_string()),
///     ..Default::default()
/// };
/// let page = render(&Declaration::Class(class));
/// assert_eq!(page, "# User\n\n**Extends:** `Model`\n\n");
/// ```
pub fn render(declaration: &Declaration) -> String {
    match declaration {
        Declaration::Class(class) => render_class(class),
        Declaration::Interface(interface) => render_interface(interface),
        Declaration::Enum(decl) => render_enum(decl),
    }
}

/// Renders a file-level page for top-level functions and constants.
///
/// `title` is usually the source file stem.
pub fn render_module(title: &str, functions: &[FunctionDoc], constants: &[ConstantDoc]) -> String {
    let mut content = format!("# {}\n\n", title);

    if !functions.is_empty() {
        content.push_str("## Functions\n\n");
        for function in functions {
            push_callable(
                &mut content,
                &function.name,
                function.docstring.as_deref(),
                function.return_type.as_deref(),
            );
        }
    }

    if !constants.is_empty() {
        content.push_str("## Constants\n\n");
        for constant in constants {
            content.push_str(&format!("### {}\n\n", constant.name));
            push_doc(&mut content, constant.docstring.as_deref());
        }
    }

    content
}

/// Turns a raw `/** ... */` block into plain paragraph text.
///
/// The delimiters are removed, every line is trimmed and loses one leading
/// `*` gutter. Lines that are then empty, or that still start with `*`, are
/// dropped, so a markdown bullet written as `* item` inside a docblock does
/// not survive. The remaining lines are joined with newlines without
/// reflowing.
pub fn format_docblock(raw: &str) -> String {
    let mut content = raw.trim();
    if let Some(rest) = content.strip_prefix("/**") {
        content = rest;
    }
    if let Some(rest) = content.strip_suffix("*/") {
        content = rest;
    }

    content
        .lines()
        .map(str::trim)
        .map(|line| line.strip_prefix('*').map(str::trim_start).unwrap_or(line))
        .filter(|line| !line.is_empty() && !line.starts_with('*'))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_class(class: &ClassDoc) -> String {
    let mut content = format!("# {}\n\n", class.name);
    push_doc(&mut content, class.docstring.as_deref());

    if let Some(ref parent) = class.extends {
        content.push_str(&format!("**Extends:** `{}`\n\n", parent));
    }

    if !class.implements.is_empty() {
        content.push_str(&format!("**Implements:** {}\n\n", code_list(&class.implements)));
    }

    push_methods(&mut content, &class.methods);
    push_properties(&mut content, &class.properties);
    content
}

fn render_interface(interface: &InterfaceDoc) -> String {
    let mut content = format!("# {} Interface\n\n", interface.name);
    push_doc(&mut content, interface.docstring.as_deref());

    if !interface.extends.is_empty() {
        content.push_str(&format!("**Extends:** {}\n\n", code_list(&interface.extends)));
    }

    push_methods(&mut content, &interface.methods);
    content
}

fn render_enum(decl: &EnumDoc) -> String {
    let mut content = format!("# {} Enum\n\n", decl.name);
    push_doc(&mut content, decl.docstring.as_deref());

    if let Some(ref backing) = decl.backing_type {
        content.push_str(&format!("**Backing Type:** `{}`\n\n", backing));
    }

    push_cases(&mut content, &decl.cases);
    content
}

fn push_methods(content: &mut String, methods: &[MethodDoc]) {
    if methods.is_empty() {
        return;
    }

    content.push_str("## Methods\n\n");
    for method in methods {
        push_callable(
            content,
            &method.name,
            method.docstring.as_deref(),
            method.return_type.as_deref(),
        );
    }
}

fn push_properties(content: &mut String, properties: &[PropertyDoc]) {
    if properties.is_empty() {
        return;
    }

    content.push_str("## Properties\n\n");
    for property in properties {
        content.push_str(&format!("### ${}\n\n", property.name));
        push_doc(content, property.docstring.as_deref());
    }
}

fn push_cases(content: &mut String, cases: &[CaseDoc]) {
    if cases.is_empty() {
        return;
    }

    content.push_str("## Cases\n\n");
    for case in cases {
        content.push_str(&format!("### {}\n\n", case.name));
        push_doc(content, case.docstring.as_deref());
    }
}

fn push_callable(content: &mut String, name: &str, doc: Option<&str>, return_type: Option<&str>) {
    content.push_str(&format!("### {}()\n\n", name));
    push_doc(content, doc);
    if let Some(return_type) = return_type {
        content.push_str(&format!("**Returns:** `{}`\n\n", return_type));
    }
}

/// Appends the normalized doc-comment as a paragraph, if anything is left of it.
fn push_doc(content: &mut String, doc: Option<&str>) {
    let Some(raw) = doc else {
        return;
    };

    let text = format_docblock(raw);
    if !text.is_empty() {
        content.push_str(&text);
        content.push_str("\n\n");
    }
}

fn code_list(names: &[String]) -> String {
    names
        .iter()
        .map(|name| format!("`{}`", name))
        .collect::<Vec<_>>()
        .join(", ")
}

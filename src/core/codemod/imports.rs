//! Making sure the translation function is imported.
//!
//! Imports are edited as text next to the existing declaration, so the rest of
//! the import block keeps its formatting.

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use swc_common::Spanned;
use swc_ecma_ast::{
    Expr, ExprStmt, ImportDecl, ImportSpecifier, Lit, ModuleDecl, ModuleExportName, ModuleItem,
    Stmt,
};

use crate::core::codemod::edit::TextEdit;
use crate::core::parsers::ParsedSource;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ImportKind {
    /// `import { t } from "source"`
    #[default]
    Named,
    /// `import t from "source"`
    Default,
}

/// A module import that must exist after patching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportBinding {
    pub source: String,
    pub symbol: String,
    pub kind: ImportKind,
}

/// What import management did to the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum ImportChange {
    /// Import management was not requested.
    Skipped,
    /// The binding was already imported.
    AlreadyPresent,
    /// A specifier was added to an existing declaration.
    SpecifierAdded,
    /// A new import declaration was inserted.
    DeclarationAdded,
}

impl ImportBinding {
    pub fn new(source: impl Into<String>, symbol: impl Into<String>, kind: ImportKind) -> Self {
        Self {
            source: source.into(),
            symbol: symbol.into(),
            kind,
        }
    }

    fn declaration(&self) -> String {
        let source = serde_json::Value::String(self.source.clone()).to_string();
        match self.kind {
            ImportKind::Named => format!("import {{ {} }} from {};", self.symbol, source),
            ImportKind::Default => format!("import {} from {};", self.symbol, source),
        }
    }
}

/// Plan the edit that guarantees `binding` is imported in `parsed`.
///
/// The first non-type-only declaration importing from `binding.source` is
/// extended; otherwise a new declaration is inserted after the directive
/// prologue. Returns no edit when the binding is already there, so applying
/// the same binding twice never duplicates a specifier.
pub fn plan_import(
    parsed: &ParsedSource,
    binding: &ImportBinding,
) -> (ImportChange, Option<TextEdit>) {
    let existing = parsed.module.body.iter().find_map(|item| match item {
        ModuleItem::ModuleDecl(ModuleDecl::Import(decl))
            if !decl.type_only && decl.src.value.as_str() == Some(binding.source.as_str()) =>
        {
            Some(decl)
        }
        _ => None,
    });

    match existing {
        Some(decl) if has_binding(decl, binding) => (ImportChange::AlreadyPresent, None),
        Some(decl) => extend_declaration(parsed, decl, binding),
        None => (
            ImportChange::DeclarationAdded,
            Some(insert_declaration(parsed, binding)),
        ),
    }
}

fn has_binding(decl: &ImportDecl, binding: &ImportBinding) -> bool {
    decl.specifiers.iter().any(|spec| match (binding.kind, spec) {
        (ImportKind::Named, ImportSpecifier::Named(named)) => {
            let imported = match &named.imported {
                Some(ModuleExportName::Ident(ident)) => ident.sym.to_string(),
                Some(ModuleExportName::Str(s)) => s.value.to_string_lossy().to_string(),
                None => named.local.sym.to_string(),
            };
            !named.is_type_only
                && imported == binding.symbol
                && named.local.sym.as_str() == binding.symbol
        }
        (ImportKind::Default, ImportSpecifier::Default(default)) => {
            default.local.sym.as_str() == binding.symbol
        }
        _ => false,
    })
}

fn extend_declaration(
    parsed: &ParsedSource,
    decl: &ImportDecl,
    binding: &ImportBinding,
) -> (ImportChange, Option<TextEdit>) {
    let symbol = &binding.symbol;
    let head_range = parsed.offset(decl.span.lo)..parsed.offset(decl.src.span.lo);
    let head = parsed.code.get(head_range.clone()).unwrap_or_default();

    let default = decl.specifiers.iter().find_map(|s| match s {
        ImportSpecifier::Default(d) => Some(d),
        _ => None,
    });
    let has_namespace = decl
        .specifiers
        .iter()
        .any(|s| matches!(s, ImportSpecifier::Namespace(_)));
    let last_named = decl
        .specifiers
        .iter()
        .rev()
        .find(|s| matches!(s, ImportSpecifier::Named(_)));

    // `import "source";`
    if head.trim() == "import" {
        let replacement = match binding.kind {
            ImportKind::Named => format!("import {{ {} }} from ", symbol),
            ImportKind::Default => format!("import {} from ", symbol),
        };
        return (
            ImportChange::SpecifierAdded,
            Some(TextEdit::replace(head_range, replacement)),
        );
    }

    match binding.kind {
        ImportKind::Named => {
            if let Some(last) = last_named {
                let at = parsed.offset(last.span().hi);
                return (
                    ImportChange::SpecifierAdded,
                    Some(TextEdit::insert(at, format!(", {}", symbol))),
                );
            }
            if has_namespace {
                return insert_after(parsed, decl, binding);
            }
            // `import {} from` or `import React, {} from`
            if let (Some(open), Some(close)) = (head.find('{'), head.rfind('}')) {
                let start = head_range.start + open;
                let end = head_range.start + close + 1;
                return (
                    ImportChange::SpecifierAdded,
                    Some(TextEdit::replace(start..end, format!("{{ {} }}", symbol))),
                );
            }
            match default {
                Some(default) => (
                    ImportChange::SpecifierAdded,
                    Some(TextEdit::insert(
                        parsed.offset(default.span.hi),
                        format!(", {{ {} }}", symbol),
                    )),
                ),
                None => insert_after(parsed, decl, binding),
            }
        }
        ImportKind::Default => {
            if default.is_some() {
                // A module has one default export; a second local name for it
                // needs its own declaration.
                return insert_after(parsed, decl, binding);
            }
            let keyword_end = "import".len();
            let rest = head.get(keyword_end..).unwrap_or_default();
            let at = head_range.start + keyword_end + (rest.len() - rest.trim_start().len());
            (
                ImportChange::SpecifierAdded,
                Some(TextEdit::insert(at, format!("{}, ", symbol))),
            )
        }
    }
}

fn insert_after(
    parsed: &ParsedSource,
    decl: &ImportDecl,
    binding: &ImportBinding,
) -> (ImportChange, Option<TextEdit>) {
    let at = parsed.offset(decl.span.hi);
    let eol = line_ending(&parsed.code);
    (
        ImportChange::DeclarationAdded,
        Some(TextEdit::insert(at, format!("{}{}", eol, binding.declaration()))),
    )
}

/// The line terminator the file already uses: CRLF when its first line ends
/// with one, LF otherwise.
fn line_ending(code: &str) -> &'static str {
    match code.find('\n') {
        Some(idx) if code[..idx].ends_with('\r') => "\r\n",
        _ => "\n",
    }
}

fn is_directive(item: &ModuleItem) -> bool {
    matches!(
        item,
        ModuleItem::Stmt(Stmt::Expr(ExprStmt { expr, .. })) if matches!(&**expr, Expr::Lit(Lit::Str(_)))
    )
}

/// New declaration before the first statement that is not part of the
/// directive prologue.
fn insert_declaration(parsed: &ParsedSource, binding: &ImportBinding) -> TextEdit {
    let body = &parsed.module.body;
    let declaration = binding.declaration();
    let eol = line_ending(&parsed.code);

    if let Some(first) = body.iter().find(|item| !is_directive(item)) {
        return TextEdit::insert(
            parsed.offset(first.span().lo),
            format!("{}{}", declaration, eol),
        );
    }

    if let Some(last) = body.last() {
        return TextEdit::insert(
            parsed.offset(last.span().hi),
            format!("{}{}", eol, declaration),
        );
    }

    let end = parsed.offset(parsed.source_file.end_pos);
    let prefix = if parsed.code.is_empty() || parsed.code.ends_with('\n') {
        ""
    } else {
        eol
    };
    TextEdit::insert(end, format!("{}{}{}", prefix, declaration, eol))
}

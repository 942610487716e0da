//! Finding the single node a patch request points at.

use swc_common::{BytePos, Span};
use swc_ecma_ast::{
    CallExpr, Callee, ExportAll, Expr, ExprStmt, ImportDecl, JSXAttr, JSXAttrValue, JSXText,
    Lit, ModuleItem, NamedExport, PropName, Stmt, TaggedTpl, TsEnumDecl, TsImportEqualsDecl,
    TsInterfaceDecl, TsModuleName, TsType, TsTypeAliasDecl, TsTypeAnn,
};
use swc_ecma_visit::{Visit, VisitWith};

use crate::core::parsers::ParsedSource;
use crate::core::scan::callee::static_template_text;
use crate::core::utils::jsx_text_margins;

/// Node shapes a literal can be wrapped in, in matching priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralShape {
    JsxText,
    StringLiteral,
    TemplateLiteral,
}

/// Syntactic position of the matched literal, which decides how the call is
/// spliced in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Any expression position: the literal is replaced by the call.
    Expression,
    /// JSX child text: the call goes into an expression container.
    JsxChild,
    /// `title="..."`: the call goes into an expression container.
    JsxAttributeValue,
    /// `{ "key": value }`: the call becomes a computed key.
    PropertyKey,
}

impl Placement {
    pub fn wrap(&self, call: &str) -> String {
        match self {
            Placement::Expression => call.to_string(),
            Placement::JsxChild | Placement::JsxAttributeValue => format!("{{{}}}", call),
            Placement::PropertyKey => format!("[{}]", call),
        }
    }
}

/// The node to replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Located {
    pub shape: LiteralShape,
    pub placement: Placement,
    /// Source range replaced by the call. For JSX text this is the trimmed
    /// text, so surrounding whitespace stays in place.
    pub span: Span,
}

/// Find the first node, in source traversal order, that starts at
/// `(line, column)` and whose trimmed text equals `text`.
pub fn locate(parsed: &ParsedSource, text: &str, line: usize, column: usize) -> Option<Located> {
    let mut locator = Locator {
        parsed,
        text: text.trim(),
        position: (line, column),
        found: None,
    };
    parsed.module.visit_with(&mut locator);
    locator.found
}

struct Locator<'a> {
    parsed: &'a ParsedSource,
    text: &'a str,
    position: (usize, usize),
    found: Option<Located>,
}

impl<'a> Locator<'a> {
    fn starts_at(&self, pos: BytePos) -> bool {
        self.parsed.position(pos) == self.position
    }

    fn try_match(&mut self, shape: LiteralShape, placement: Placement, span: Span, value: &str) {
        if self.found.is_none() && value.trim() == self.text && self.starts_at(span.lo) {
            self.found = Some(Located {
                shape,
                placement,
                span,
            });
        }
    }
}

fn is_directive(stmt: &Stmt) -> bool {
    matches!(stmt, Stmt::Expr(ExprStmt { expr, .. }) if matches!(&**expr, Expr::Lit(Lit::Str(_))))
}

impl<'a> Visit for Locator<'a> {
    fn visit_module_items(&mut self, items: &[ModuleItem]) {
        let body = items
            .iter()
            .skip_while(|item| matches!(item, ModuleItem::Stmt(stmt) if is_directive(stmt)));
        for item in body {
            if self.found.is_some() {
                return;
            }
            item.visit_with(self);
        }
    }

    fn visit_stmts(&mut self, stmts: &[Stmt]) {
        for stmt in stmts.iter().skip_while(|stmt| is_directive(stmt)) {
            if self.found.is_some() {
                return;
            }
            stmt.visit_with(self);
        }
    }

    fn visit_expr(&mut self, node: &Expr) {
        if self.found.is_some() {
            return;
        }
        match node {
            Expr::Lit(Lit::Str(s)) => {
                if let Some(value) = s.value.as_str() {
                    self.try_match(
                        LiteralShape::StringLiteral,
                        Placement::Expression,
                        s.span,
                        value,
                    );
                }
            }
            Expr::Tpl(tpl) => {
                if let Some(value) = static_template_text(tpl) {
                    self.try_match(
                        LiteralShape::TemplateLiteral,
                        Placement::Expression,
                        tpl.span,
                        &value,
                    );
                }
            }
            _ => {}
        }
        node.visit_children_with(self);
    }

    fn visit_jsx_text(&mut self, node: &JSXText) {
        let value: &str = &node.value;
        let trimmed = value.trim();
        if self.found.is_some() || trimmed.is_empty() || trimmed != self.text {
            return;
        }

        // Offsets come from the raw text, which may spell entities out.
        let (leading, trailing) = jsx_text_margins(&node.raw);
        let lo = node.span.lo + BytePos(leading as u32);
        let hi = node.span.hi - BytePos(trailing as u32);

        // The scanner reports where the text starts; the node start (before
        // any leading whitespace) is accepted too.
        if self.starts_at(lo) || self.starts_at(node.span.lo) {
            self.found = Some(Located {
                shape: LiteralShape::JsxText,
                placement: Placement::JsxChild,
                span: Span::new(lo, hi),
            });
        }
    }

    fn visit_jsx_attr(&mut self, node: &JSXAttr) {
        if let Some(JSXAttrValue::Str(s)) = &node.value {
            if let Some(value) = s.value.as_str() {
                self.try_match(
                    LiteralShape::StringLiteral,
                    Placement::JsxAttributeValue,
                    s.span,
                    value,
                );
            }
            return;
        }
        node.visit_children_with(self);
    }

    fn visit_prop_name(&mut self, node: &PropName) {
        match node {
            PropName::Str(s) => {
                if let Some(value) = s.value.as_str() {
                    self.try_match(
                        LiteralShape::StringLiteral,
                        Placement::PropertyKey,
                        s.span,
                        value,
                    );
                }
            }
            _ => node.visit_children_with(self),
        }
    }

    fn visit_call_expr(&mut self, node: &CallExpr) {
        // `import("./module")` takes a specifier, not text.
        if matches!(node.callee, Callee::Import(_)) {
            return;
        }
        node.visit_children_with(self);
    }

    fn visit_tagged_tpl(&mut self, node: &TaggedTpl) {
        // The template belongs to its tag; only the tag expression and the
        // interpolated expressions are candidates.
        node.tag.visit_with(self);
        for expr in &node.tpl.exprs {
            expr.visit_with(self);
        }
    }

    // Module specifiers and type-level strings are never localizable text.
    fn visit_import_decl(&mut self, _: &ImportDecl) {}
    fn visit_named_export(&mut self, _: &NamedExport) {}
    fn visit_export_all(&mut self, _: &ExportAll) {}
    fn visit_ts_import_equals_decl(&mut self, _: &TsImportEqualsDecl) {}
    fn visit_ts_module_name(&mut self, _: &TsModuleName) {}
    fn visit_ts_type(&mut self, _: &TsType) {}
    fn visit_ts_type_ann(&mut self, _: &TsTypeAnn) {}
    fn visit_ts_interface_decl(&mut self, _: &TsInterfaceDecl) {}
    fn visit_ts_type_alias_decl(&mut self, _: &TsTypeAliasDecl) {}
    fn visit_ts_enum_decl(&mut self, _: &TsEnumDecl) {}
}

use swc_common::BytePos;
use swc_ecma_ast::{CallExpr, Callee, JSXText, Module};
use swc_ecma_visit::{Visit, VisitWith};

use crate::core::parsers::ParsedSource;
use crate::core::scan::callee::{TranslationFunctions, callee_name, static_key};
use crate::core::scan::candidate::SourceCandidate;
use crate::core::utils::jsx_text_margins;

/// Collects candidates from one parsed file.
///
/// Two independent rules apply:
/// - JSX text that is non-empty and single-segment after trimming (no newline
///   or tab inside) becomes a plain candidate
/// - a call whose callee is in the allow-list and whose first argument is a
///   static key becomes a localized candidate positioned at the call
pub struct CandidateCollector<'a> {
    parsed: &'a ParsedSource,
    file_path: &'a str,
    functions: &'a TranslationFunctions,
    candidates: Vec<SourceCandidate>,
}

impl<'a> CandidateCollector<'a> {
    pub fn new(
        parsed: &'a ParsedSource,
        file_path: &'a str,
        functions: &'a TranslationFunctions,
    ) -> Self {
        Self {
            parsed,
            file_path,
            functions,
            candidates: Vec::new(),
        }
    }

    pub fn collect(mut self, module: &Module) -> Vec<SourceCandidate> {
        self.visit_module(module);
        self.candidates
    }

    fn context_at(&self, line: usize) -> String {
        self.parsed.line_text(line)
    }
}

impl<'a> Visit for CandidateCollector<'a> {
    fn visit_jsx_text(&mut self, node: &JSXText) {
        let value: &str = &node.value;
        let trimmed = value.trim();

        if trimmed.is_empty() || trimmed.contains(['\n', '\t']) {
            return;
        }

        // Position of the text itself, past indentation and leading `&nbsp;`
        // style references.
        let (leading, _) = jsx_text_margins(&node.raw);
        let actual_pos = node.span.lo + BytePos(leading as u32);
        let (line, column) = self.parsed.position(actual_pos);
        let context = self.context_at(line);

        self.candidates.push(SourceCandidate::plain(
            trimmed,
            self.file_path,
            line,
            column,
            &context,
        ));
    }

    fn visit_call_expr(&mut self, node: &CallExpr) {
        if let Callee::Expr(callee) = &node.callee
            && let Some(name) = callee_name(callee)
            && self.functions.contains(&name)
            && let Some(key) = static_key(&node.args)
        {
            let (line, column) = self.parsed.position(node.span.lo);
            let context = self.context_at(line);
            self.candidates.push(SourceCandidate::localized(
                &key,
                self.file_path,
                line,
                column,
                &context,
            ));
        }

        node.visit_children_with(self);
    }
}

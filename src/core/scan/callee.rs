//! Recognizing translation calls and the keys they already use.

use std::collections::HashSet;

use swc_ecma_ast::{
    Expr, ExprOrSpread, Lit, MemberProp, ObjectLit, Prop, PropName, PropOrSpread, Tpl,
};

use crate::config::DEFAULT_TRANSLATION_FUNCTIONS;

/// Allow-list of call names treated as translation calls.
///
/// Names are matched against the dotted callee path, so `intl.formatMessage`
/// only matches `intl.formatMessage(...)`, not `formatMessage(...)`.
#[derive(Debug, Clone)]
pub struct TranslationFunctions {
    names: HashSet<String>,
}

impl TranslationFunctions {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = names
            .into_iter()
            .map(|n| n.as_ref().trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();
        Self { names }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for TranslationFunctions {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSLATION_FUNCTIONS)
    }
}

/// Dotted name of a callee: `t`, `intl.formatMessage`, `this.props.t`.
///
/// Computed members (`obj[name]`) and private fields have no static name.
pub fn callee_name(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Ident(ident) => Some(ident.sym.to_string()),
        Expr::This(_) => Some("this".to_string()),
        Expr::Paren(paren) => callee_name(&paren.expr),
        Expr::Member(member) => {
            let MemberProp::Ident(prop) = &member.prop else {
                return None;
            };
            let object = callee_name(&member.obj)?;
            Some(format!("{}.{}", object, prop.sym))
        }
        _ => None,
    }
}

/// The static key passed as the first argument of a translation call.
///
/// Accepted shapes:
/// - `t("key")`
/// - `` t(`key`) `` (no interpolation)
/// - `formatMessage({ id: "key" })`
pub fn static_key(args: &[ExprOrSpread]) -> Option<String> {
    let first = args.first()?;
    if first.spread.is_some() {
        return None;
    }

    let key = match &*first.expr {
        Expr::Lit(Lit::Str(s)) => s.value.as_str().map(|s| s.to_string()),
        Expr::Tpl(tpl) => static_template_text(tpl),
        Expr::Object(obj) => id_property(obj),
        _ => None,
    }?;

    let key = key.trim();
    if key.is_empty() {
        None
    } else {
        Some(key.to_string())
    }
}

/// Text of a template literal without interpolation. Falls back to the raw
/// text when the cooked value is unavailable (invalid escapes).
pub fn static_template_text(tpl: &Tpl) -> Option<String> {
    if !tpl.exprs.is_empty() || tpl.quasis.len() != 1 {
        return None;
    }
    let quasi = &tpl.quasis[0];
    let cooked = quasi
        .cooked
        .as_ref()
        .and_then(|c| c.as_str())
        .map(|s| s.to_string());
    Some(cooked.unwrap_or_else(|| quasi.raw.to_string()))
}

fn id_property(obj: &ObjectLit) -> Option<String> {
    obj.props.iter().find_map(|prop| {
        let PropOrSpread::Prop(prop) = prop else {
            return None;
        };
        let Prop::KeyValue(kv) = &**prop else {
            return None;
        };
        let is_id = match &kv.key {
            PropName::Ident(ident) => ident.sym == "id",
            PropName::Str(s) => s.value.as_str() == Some("id"),
            _ => false,
        };
        match &*kv.value {
            Expr::Lit(Lit::Str(s)) if is_id => s.value.as_str().map(|s| s.to_string()),
            _ => None,
        }
    })
}

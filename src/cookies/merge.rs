//! Merge static and dynamic cookie lists and apply the result.
//!
//! # Rules
//! - Effective list = unique-by-name(dynamic ++ static), first occurrence wins
//! - Options: entry's own, else route defaults, else empty (never field-merged)
//! - Value present (even empty) sets the cookie; absent clears it

use std::collections::HashSet;

use crate::cookies::descriptor::{CookieDescriptor, CookieOptions};
use crate::cookies::registry::CookieRoute;
use crate::cookies::sink::CookieSink;
use crate::cookies::CookieError;

/// Merge request-time cookies over route-declared ones.
///
/// Order of the result follows the concatenation `dynamic ++ fixed` with later
/// duplicates dropped, so a dynamic entry shadows a static entry of the same
/// name and a repeated name inside one list keeps its first occurrence.
pub fn merge(dynamic: Vec<CookieDescriptor>, fixed: &[CookieDescriptor]) -> Vec<CookieDescriptor> {
    let mut seen = HashSet::with_capacity(dynamic.len() + fixed.len());
    dynamic
        .into_iter()
        .chain(fixed.iter().cloned())
        .filter(|entry| seen.insert(entry.name.clone()))
        .collect()
}

/// Options applied to `entry`.
pub fn resolve_options(entry: &CookieDescriptor, defaults: Option<&CookieOptions>) -> CookieOptions {
    entry
        .options
        .as_ref()
        .or(defaults)
        .cloned()
        .unwrap_or_default()
}

/// Merge `dynamic` with the route's static cookies and write the result to `sink`.
///
/// Returns the number of cookies set or cleared. Every cookie to set is
/// checked with [`CookieSink::check`] before any is written, so a rejected
/// entry leaves the sink untouched.
pub fn apply<S: CookieSink + ?Sized>(
    route: Option<&CookieRoute>,
    dynamic: Vec<CookieDescriptor>,
    sink: &mut S,
) -> Result<usize, CookieError> {
    let (defaults, fixed) = match route {
        Some(route) => (route.defaults.as_ref(), route.cookies.as_slice()),
        None => (None, &[][..]),
    };

    let effective = merge(dynamic, fixed);
    let resolved: Vec<(&CookieDescriptor, CookieOptions)> = effective
        .iter()
        .map(|entry| (entry, resolve_options(entry, defaults)))
        .collect();

    for (entry, options) in &resolved {
        if entry.value.is_some() {
            sink.check(&entry.name, options)?;
        }
    }

    for (entry, options) in &resolved {
        match &entry.value {
            Some(value) => sink.set(&entry.name, value, options)?,
            None => sink.clear(&entry.name),
        }
    }

    Ok(resolved.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Op {
        Set(String, String, CookieOptions),
        Clear(String),
    }

    #[derive(Default)]
    struct RecordingSink {
        ops: Vec<Op>,
        reject_signed: bool,
    }

    impl CookieSink for RecordingSink {
        fn check(&self, name: &str, options: &CookieOptions) -> Result<(), CookieError> {
            if self.reject_signed && options.is_signed() {
                return Err(CookieError::MissingKey { name: name.into() });
            }
            Ok(())
        }

        fn set(&mut self, name: &str, value: &str, options: &CookieOptions) -> Result<(), CookieError> {
            self.ops.push(Op::Set(name.into(), value.into(), options.clone()));
            Ok(())
        }

        fn clear(&mut self, name: &str) {
            self.ops.push(Op::Clear(name.into()));
        }
    }

    fn names(list: &[CookieDescriptor]) -> Vec<&str> {
        list.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_disjoint_lists_union() {
        let fixed = vec![CookieDescriptor::set("a", "1"), CookieDescriptor::set("b", "2")];
        let dynamic = vec![CookieDescriptor::set("c", "3")];

        let merged = merge(dynamic, &fixed);
        assert_eq!(names(&merged), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_dynamic_shadows_static() {
        let fixed = vec![CookieDescriptor::set("a", "1")
            .with_options(CookieOptions::new().path("/static"))];
        let dynamic = vec![CookieDescriptor::set("a", "2")
            .with_options(CookieOptions::new().path("/dynamic"))];

        let merged = merge(dynamic.clone(), &fixed);
        assert_eq!(merged, dynamic);

        // Same inputs, same output.
        assert_eq!(merge(dynamic.clone(), &fixed), merged);
    }

    #[test]
    fn test_duplicates_within_one_list_keep_first() {
        let dynamic = vec![
            CookieDescriptor::set("a", "first"),
            CookieDescriptor::set("a", "second"),
        ];
        let merged = merge(dynamic, &[]);
        assert_eq!(merged, vec![CookieDescriptor::set("a", "first")]);
    }

    #[test]
    fn test_resolve_falls_back_to_defaults() {
        let defaults = CookieOptions::new().http_only(true);
        let entry = CookieDescriptor::set("a", "1");
        assert_eq!(resolve_options(&entry, Some(&defaults)), defaults);
        assert_eq!(resolve_options(&entry, None), CookieOptions::default());
    }

    #[test]
    fn test_resolve_does_not_merge_fields() {
        let defaults = CookieOptions::new().http_only(true).path("/app");
        let entry = CookieDescriptor::set("a", "1")
            .with_options(CookieOptions::new().http_only(false));

        let resolved = resolve_options(&entry, Some(&defaults));
        assert_eq!(resolved, CookieOptions::new().http_only(false));
        assert!(resolved.path.is_none());
    }

    #[test]
    fn test_apply_sets_dynamic_value() {
        let route = CookieRoute::new().set("a", "1");
        let mut sink = RecordingSink::default();

        let applied = apply(Some(&route), vec![CookieDescriptor::set("a", "2")], &mut sink).unwrap();

        assert_eq!(applied, 1);
        assert_eq!(sink.ops, vec![Op::Set("a".into(), "2".into(), CookieOptions::default())]);
    }

    #[test]
    fn test_apply_clears_name_only_entry() {
        let route = CookieRoute::new().defaults(CookieOptions::new().http_only(true));
        let mut sink = RecordingSink::default();

        apply(Some(&route), vec![CookieDescriptor::clear("x")], &mut sink).unwrap();

        assert_eq!(sink.ops, vec![Op::Clear("x".into())]);
    }

    #[test]
    fn test_apply_uses_route_defaults() {
        let defaults = CookieOptions::new().http_only(true);
        let route = CookieRoute::new().defaults(defaults.clone());
        let mut sink = RecordingSink::default();

        apply(Some(&route), vec![CookieDescriptor::set("a", "")], &mut sink).unwrap();

        assert_eq!(sink.ops, vec![Op::Set("a".into(), "".into(), defaults)]);
    }

    #[test]
    fn test_apply_without_route() {
        let mut sink = RecordingSink::default();
        let applied = apply(None, vec![CookieDescriptor::set("a", "1")], &mut sink).unwrap();

        assert_eq!(applied, 1);
        assert_eq!(sink.ops, vec![Op::Set("a".into(), "1".into(), CookieOptions::default())]);
    }

    #[test]
    fn test_apply_order_follows_merge() {
        let route = CookieRoute::new().set("s1", "1").clear(["s2"]);
        let mut sink = RecordingSink::default();

        apply(Some(&route), vec![CookieDescriptor::set("d", "x")], &mut sink).unwrap();

        assert_eq!(
            sink.ops,
            vec![
                Op::Set("d".into(), "x".into(), CookieOptions::default()),
                Op::Set("s1".into(), "1".into(), CookieOptions::default()),
                Op::Clear("s2".into()),
            ]
        );
    }

    #[test]
    fn test_apply_writes_nothing_when_any_entry_is_rejected() {
        let route = CookieRoute::new()
            .set("plain", "1")
            .clear(["old"])
            .set_with("token", "v", CookieOptions::new().signed(true));
        let mut sink = RecordingSink { reject_signed: true, ..Default::default() };

        let err = apply(Some(&route), vec![], &mut sink).unwrap_err();

        assert!(matches!(err, CookieError::MissingKey { ref name } if name == "token"));
        assert!(sink.ops.is_empty());
    }
}

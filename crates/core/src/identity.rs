//! Per-instance identity for mounted composites.
//!
//! The host owns an [`IdentityRegistry`] and keys it by [`InstanceHandle`].
//! A generated id is written once, when the instance is mounted, and read
//! back unchanged on every render until the instance is unmounted.

use crate::content::Renderable;
use crate::error::SlotwireError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default prefix for generated instance ids.
pub const DEFAULT_ID_NAMESPACE: &str = "slotwire";

/// Stable handle for one mounted composite instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceHandle(u32);

impl InstanceHandle {
    /// Wraps a host-provided handle value.
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw handle value.
    pub fn raw(self) -> u32 {
        self.0
    }
}

/// Caller-provided identity inputs for one render.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityRequest {
    /// Id to use verbatim instead of the generated one.
    #[serde(default)]
    pub explicit_id: Option<String>,
    /// Whether diagnostic attributes are exposed.
    #[serde(default)]
    pub debug_mode: bool,
}

/// Identity attached to one render of a composite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityContext {
    /// Instance id, also the prefix for slot element ids.
    pub instance_id: String,
    /// Diagnostic mode flag.
    pub debug_mode: bool,
}

impl IdentityContext {
    /// Creates a context directly, e.g. for hosts that manage ids themselves.
    pub fn new(instance_id: impl Into<String>, debug_mode: bool) -> Self {
        Self {
            instance_id: instance_id.into(),
            debug_mode,
        }
    }

    /// Diagnostic attributes for inspection tooling. Empty unless debug mode is on.
    pub fn diagnostic_attributes(&self) -> Vec<(&'static str, String)> {
        if !self.debug_mode {
            return Vec::new();
        }
        vec![
            ("data-instance-id", self.instance_id.clone()),
            ("data-debug", "true".to_string()),
        ]
    }
}

/// Cache of generated ids keyed by instance handle.
///
/// Generated ids are unique per registry. Registries rendering into the same
/// document need distinct namespaces.
#[derive(Debug)]
pub struct IdentityRegistry {
    namespace: String,
    next_sequence: u64,
    next_handle: u32,
    generated: HashMap<InstanceHandle, String>,
}

impl IdentityRegistry {
    /// Creates a registry whose generated ids start with `namespace`.
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            next_sequence: 0,
            next_handle: 0,
            generated: HashMap::new(),
        }
    }

    /// Allocates a fresh handle and mounts it.
    pub fn mount(&mut self) -> InstanceHandle {
        while self
            .generated
            .contains_key(&InstanceHandle::new(self.next_handle))
        {
            self.next_handle = self.next_handle.wrapping_add(1);
        }
        let handle = InstanceHandle::new(self.next_handle);
        self.next_handle = self.next_handle.wrapping_add(1);
        self.mount_handle(handle);
        handle
    }

    /// Mounts a host-supplied handle, generating its id if it has none yet.
    ///
    /// Mounting an already mounted handle keeps the existing id.
    pub fn mount_handle(&mut self, handle: InstanceHandle) -> &str {
        let Self {
            namespace,
            next_sequence,
            generated,
            ..
        } = self;
        generated.entry(handle).or_insert_with(|| {
            *next_sequence += 1;
            let id = format!("{}-{}", namespace, next_sequence);
            log::debug!("mounted instance {} as '{}'", handle.raw(), id);
            id
        })
    }

    /// Forgets a handle. Returns false if it was not mounted.
    pub fn unmount(&mut self, handle: InstanceHandle) -> bool {
        self.generated.remove(&handle).is_some()
    }

    /// Returns true if `handle` is mounted.
    pub fn is_mounted(&self, handle: InstanceHandle) -> bool {
        self.generated.contains_key(&handle)
    }

    /// Number of mounted instances.
    pub fn len(&self) -> usize {
        self.generated.len()
    }

    /// Returns true if nothing is mounted.
    pub fn is_empty(&self) -> bool {
        self.generated.is_empty()
    }

    /// Resolves the identity for one render of a mounted instance.
    ///
    /// A usable explicit id wins and is used verbatim; otherwise the id
    /// generated at mount time is returned. Explicit ids that are blank or
    /// contain whitespace are ignored, since `aria-labelledby` splits on
    /// whitespace.
    pub fn resolve(
        &self,
        handle: InstanceHandle,
        request: &IdentityRequest,
    ) -> Result<IdentityContext, SlotwireError> {
        let generated = self
            .generated
            .get(&handle)
            .ok_or(SlotwireError::UnknownInstance {
                handle: handle.raw(),
            })?;
        let instance_id = match &request.explicit_id {
            Some(explicit) if is_valid_instance_id(explicit) => explicit.clone(),
            Some(explicit) if explicit.is_renderable() => {
                log::warn!(
                    "ignoring explicit id '{}': ids must not contain whitespace",
                    explicit
                );
                generated.clone()
            }
            _ => generated.clone(),
        };
        Ok(IdentityContext::new(instance_id, request.debug_mode))
    }
}

/// Returns true if `id` can prefix element ids referenced from ARIA
/// attributes: non-empty and free of whitespace.
pub fn is_valid_instance_id(id: &str) -> bool {
    !id.is_empty() && !id.chars().any(char::is_whitespace)
}

impl Default for IdentityRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_ID_NAMESPACE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_is_stable_across_renders() {
        let mut registry = IdentityRegistry::default();
        let handle = registry.mount();
        let request = IdentityRequest::default();
        let first = registry.resolve(handle, &request).unwrap();
        let second = registry.resolve(handle, &request).unwrap();
        assert_eq!(first.instance_id, second.instance_id);
        assert!(first.instance_id.starts_with("slotwire-"));
    }

    #[test]
    fn distinct_instances_never_collide() {
        let mut registry = IdentityRegistry::new("card");
        let handles: Vec<_> = (0..100).map(|_| registry.mount()).collect();
        let mut ids: Vec<String> = handles
            .iter()
            .map(|h| {
                registry
                    .resolve(*h, &IdentityRequest::default())
                    .unwrap()
                    .instance_id
            })
            .collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn remounting_does_not_regenerate() {
        let mut registry = IdentityRegistry::default();
        let handle = InstanceHandle::new(42);
        let first = registry.mount_handle(handle).to_string();
        let second = registry.mount_handle(handle).to_string();
        assert_eq!(first, second);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn ids_are_not_reused_after_unmount() {
        let mut registry = IdentityRegistry::default();
        let handle = InstanceHandle::new(1);
        let first = registry.mount_handle(handle).to_string();
        assert!(registry.unmount(handle));
        let second = registry.mount_handle(handle).to_string();
        assert_ne!(first, second);
    }

    #[test]
    fn allocated_handles_skip_host_supplied_ones() {
        let mut registry = IdentityRegistry::default();
        registry.mount_handle(InstanceHandle::new(0));
        let handle = registry.mount();
        assert_ne!(handle, InstanceHandle::new(0));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn explicit_id_is_used_verbatim() {
        let mut registry = IdentityRegistry::default();
        let handle = registry.mount();
        let request = IdentityRequest {
            explicit_id: Some("hero-card".into()),
            debug_mode: true,
        };
        let ctx = registry.resolve(handle, &request).unwrap();
        assert_eq!(ctx.instance_id, "hero-card");
        assert!(ctx.debug_mode);
    }

    #[test]
    fn blank_explicit_id_falls_back_to_generated() {
        let mut registry = IdentityRegistry::default();
        let handle = registry.mount();
        let generated = registry
            .resolve(handle, &IdentityRequest::default())
            .unwrap();
        let ctx = registry
            .resolve(
                handle,
                &IdentityRequest {
                    explicit_id: Some("  ".into()),
                    debug_mode: false,
                },
            )
            .unwrap();
        assert_eq!(ctx, generated);
    }

    #[test]
    fn explicit_id_with_whitespace_falls_back_to_generated() {
        let mut registry = IdentityRegistry::default();
        let handle = registry.mount();
        let generated = registry
            .resolve(handle, &IdentityRequest::default())
            .unwrap();
        for explicit in ["my card", "card\t1", " hero "] {
            let ctx = registry
                .resolve(
                    handle,
                    &IdentityRequest {
                        explicit_id: Some(explicit.into()),
                        debug_mode: false,
                    },
                )
                .unwrap();
            assert_eq!(ctx, generated, "{explicit:?}");
        }
    }

    #[test]
    fn instance_id_validation() {
        assert!(is_valid_instance_id("hero-card"));
        assert!(!is_valid_instance_id(""));
        assert!(!is_valid_instance_id("my card"));
        assert!(!is_valid_instance_id("a\nb"));
    }

    #[test]
    fn unknown_handle_is_an_error() {
        let registry = IdentityRegistry::default();
        let err = registry
            .resolve(InstanceHandle::new(9), &IdentityRequest::default())
            .unwrap_err();
        assert!(matches!(err, SlotwireError::UnknownInstance { handle: 9 }));
    }

    #[test]
    fn diagnostics_only_in_debug_mode() {
        assert!(
            IdentityContext::new("a", false)
                .diagnostic_attributes()
                .is_empty()
        );
        assert_eq!(
            IdentityContext::new("a", true).diagnostic_attributes(),
            vec![
                ("data-instance-id", "a".to_string()),
                ("data-debug", "true".to_string()),
            ]
        );
    }

    #[test]
    fn request_deserializes_camel_case() {
        let request: IdentityRequest =
            serde_json::from_str(r#"{"explicitId":"x","debugMode":true}"#).unwrap();
        assert_eq!(request.explicit_id.as_deref(), Some("x"));
        assert!(request.debug_mode);
    }
}

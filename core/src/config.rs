//! Checker configuration for resource limits.
//!
//! This module provides [`CheckConfig`] for bounding the work done per
//! declaration or call site, and [`DepthGuard`] for tracking how deep the
//! constant resolver has followed references.
//!
//! # Example
//!
//! ```ignore
//! use fmtcontract_core::config::CheckConfig;
//!
//! // Default limits (resolution depth: 128, folded constants: 1 MiB,
//! // no template size limits)
//! let config = CheckConfig::default();
//!
//! // Reject very long templates
//! let config = CheckConfig::new()
//!     .with_max_template_len(64 * 1024)
//!     .with_max_specifiers(512);
//! ```

/// Configuration for checker resource limits.
///
/// # Default Values
///
/// | Setting | Default | Rationale |
/// |---------|---------|-----------|
/// | `max_resolution_depth` | 128 | Constant chains in real code are shallow |
/// | `max_constant_len` | 1 MiB | Folded templates in real code are short |
/// | `max_template_len` | `usize::MAX` | No limit by default |
/// | `max_specifiers` | `usize::MAX` | No limit by default |
///
/// None of the limits change a verdict for ordinary input; they only keep
/// pathological input (self-referential constants, megabyte templates) from
/// consuming unbounded stack or time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CheckConfig {
    /// Maximum number of nested concatenations, conditionals and constant
    /// references followed while resolving a template argument.
    ///
    /// Exceeding it resolves the template to "not a constant".
    ///
    /// Default: 128
    pub max_resolution_depth: usize,

    /// Maximum length in bytes of any string folded while resolving a
    /// template argument.
    ///
    /// Bounds memory when shared constants are concatenated with themselves.
    /// Exceeding it resolves the template to "not a constant".
    ///
    /// Default: 1 MiB
    pub max_constant_len: usize,

    /// Maximum template length in bytes.
    ///
    /// Longer templates are reported as malformed.
    ///
    /// Default: `usize::MAX` (no limit)
    pub max_template_len: usize,

    /// Maximum number of format specifiers in one template.
    ///
    /// Default: `usize::MAX` (no limit)
    pub max_specifiers: usize,
}

impl Default for CheckConfig {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl CheckConfig {
    /// Default configuration, usable in const contexts.
    pub const DEFAULT: Self = Self {
        max_resolution_depth: 128,
        max_constant_len: 1 << 20,
        max_template_len: usize::MAX,
        max_specifiers: usize::MAX,
    };

    #[inline]
    pub const fn new() -> Self {
        Self::DEFAULT
    }

    /// Sets the maximum constant resolution depth.
    #[inline]
    pub const fn with_max_resolution_depth(mut self, depth: usize) -> Self {
        self.max_resolution_depth = depth;
        self
    }

    /// Sets the maximum length of a folded constant string.
    #[inline]
    pub const fn with_max_constant_len(mut self, len: usize) -> Self {
        self.max_constant_len = len;
        self
    }

    /// Sets the maximum template length in bytes.
    #[inline]
    pub const fn with_max_template_len(mut self, len: usize) -> Self {
        self.max_template_len = len;
        self
    }

    /// Sets the maximum number of specifiers per template.
    #[inline]
    pub const fn with_max_specifiers(mut self, count: usize) -> Self {
        self.max_specifiers = count;
        self
    }
}

/// Tracks resolution depth while following constant references.
///
/// Pairs with [`CheckConfig::max_resolution_depth`] to provide the limit.
#[derive(Debug, Clone, Copy, Default)]
pub struct DepthGuard {
    depth: usize,
}

impl DepthGuard {
    #[inline]
    pub const fn new() -> Self {
        Self { depth: 0 }
    }

    #[inline]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Enter one level deeper.
    ///
    /// Returns `false` if the new depth exceeds `limit`; the depth is still
    /// incremented so a matching [`exit`](Self::exit) stays balanced.
    #[inline]
    pub fn enter(&mut self, limit: usize) -> bool {
        self.depth = self.depth.saturating_add(1);
        self.depth <= limit
    }

    /// Uses saturating subtraction so extra `exit()` calls don't underflow.
    #[inline]
    pub fn exit(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

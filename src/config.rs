/// How an execution-format input that points at a missing node is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferencePolicy {
    /// Drop the input and keep going. Suited to graphs coming out of an editor,
    /// where stale references are expected.
    #[default]
    Tolerant,
    /// Fail with `WorkflowError::ReferenceNotFound`. Suited to validating
    /// hand-authored workflows.
    Strict,
}

/// Whether visual-graph slots may declare the `-1` wildcard type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlotTypePolicy {
    #[default]
    AllowWildcard,
    /// Every slot must declare a named type.
    NamedOnly,
}

/// Construction-time toggles for the fork-choice service.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct ForkChoiceConfig {
    /// Keep states imported during initial sync in memory, flushing finalized entries to the
    /// store. Swapping pre-state strategies requires only a different constructor argument.
    pub init_sync_cache_state: bool,
}

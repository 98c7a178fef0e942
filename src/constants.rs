pub mod tokens {

    pub const DEFAULT_TTL_SECONDS: u32 = 3600;

    pub const REUSE_THRESHOLD_SECONDS: u32 = 60;

    /// Random bytes per token before base64 encoding (32 chars encoded).
    pub const TOKEN_BYTES: usize = 24;

    /// How far in the past a revoked token's expiration is set.
    pub const REVOKE_BACKDATE_SECONDS: i64 = 1;
}

pub mod build {

    /// Named mod slots of a build, in serialization order.
    pub const SLOT_NAMES: [&str; 10] = [
        "aura", "exilus", "mod1", "mod2", "mod3", "mod4", "mod5", "mod6", "mod7", "mod8",
    ];
}

//! Event-name catalog and protocol defaults.
//!
//! The catalog is owned by the platform; the client treats every name as an
//! opaque string and never validates against these lists. They exist so
//! consumers subscribe by constant instead of by magic string.

/// Challenge lifecycle events
pub mod challenge_events {
    pub const CREATED: &str = "challenge:created";
    pub const UPDATED: &str = "challenge:updated";
    pub const COMPLETED: &str = "challenge:completed";
}

/// Point balance events
pub mod points_events {
    pub const AWARDED: &str = "points:awarded";
    pub const ADJUSTED: &str = "points:adjusted";
}

/// Leaderboard events
pub mod leaderboard_events {
    pub const UPDATED: &str = "leaderboard:updated";
    pub const RANK_CHANGED: &str = "leaderboard:rank_changed";
}

/// Post events
pub mod post_events {
    pub const CREATED: &str = "post:created";
    pub const UPDATED: &str = "post:updated";
    pub const DELETED: &str = "post:deleted";
}

/// Comment events
pub mod comment_events {
    pub const CREATED: &str = "comment:created";
    pub const DELETED: &str = "comment:deleted";
}

/// Report events
pub mod report_events {
    pub const FILED: &str = "report:filed";
    pub const RESOLVED: &str = "report:resolved";
}

/// Announcement events
pub mod announcement_events {
    pub const PUBLISHED: &str = "announcement:published";
    pub const EXPIRED: &str = "announcement:expired";
}

/// Moderation events
pub mod moderation_events {
    pub const USER_MUTED: &str = "moderation:user_muted";
    pub const USER_BANNED: &str = "moderation:user_banned";
    pub const CONTENT_REMOVED: &str = "moderation:content_removed";
}

/// Sponsor events
pub mod sponsor_events {
    pub const JOINED: &str = "sponsor:joined";
    pub const LEFT: &str = "sponsor:left";
}

/// Reward events
pub mod reward_events {
    pub const UNLOCKED: &str = "reward:unlocked";
    pub const GRANTED: &str = "reward:granted";
}

/// Redemption events
pub mod redemption_events {
    pub const REQUESTED: &str = "redemption:requested";
    pub const APPROVED: &str = "redemption:approved";
    pub const DECLINED: &str = "redemption:declined";
}

/// System events (client/server coordination)
pub mod system_events {
    pub const SUBSCRIBE: &str = "system:subscribe";
    pub const WELCOME: &str = "system:welcome";
}

/// Fixed delay between reconnect attempts (milliseconds)
pub const RETRY_DELAY_MS: u64 = 1000;

/// Consecutive failed handshakes tolerated before giving up
pub const MAX_CONNECT_ATTEMPTS: u32 = 5;

/// Query parameter carrying the session token during the handshake
pub const TOKEN_QUERY_PARAM: &str = "token";

/// URL path under which the cache directory is served, and the prefix of every photo reference.
pub const PHOTOS_URL_PREFIX: &str = "/photos";

/// Used when an upload arrives with a file name that has nothing usable left after sanitising.
pub(crate) const FALLBACK_FILENAME: &str = "upload";

/// Upper bound on timestamp bumps while looking for a free file name.
pub(crate) const MAX_NAME_ATTEMPTS: i64 = 1_000;

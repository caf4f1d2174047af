// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role. Reading these constants should tell you the story of how
//! the system operates: which columns it reads, how many subject options it
//! guarantees, how it paces calls to the provider.

// ---------------------------------------------------------------------------
// Lead table columns
// ---------------------------------------------------------------------------

/// Column holding the company website to research. Rows without a value here
/// are skipped, never failed.
pub const URL_COLUMN: &str = "URL";

/// Column holding the contact's full name, used for `[Target]` substitution.
pub const CONTACT_NAME_COLUMN: &str = "CEO Name";

/// Column holding the contact's email address. Passed through untouched.
pub const CONTACT_EMAIL_COLUMN: &str = "CEO Email";

/// Column consulted by the `segment` subcommand.
pub const COUNTRY_COLUMN: &str = "Country";

// ---------------------------------------------------------------------------
// Copy extraction contract
// ---------------------------------------------------------------------------

/// Number of subject-line slots every output row carries.
///
/// Downstream mail-merge tooling relies on exactly this many columns being
/// present, so the parser pads or truncates to this arity.
pub const SUBJECT_SLOTS: usize = 4;

/// Placeholder the prompt instructs the model to put where the contact's
/// first name belongs. Left literal when no contact name is available.
pub const NAME_PLACEHOLDER: &str = "[Target]";

/// Salutation marker that opens the email body in the model's answer.
pub const BODY_OPENING: &str = "Hey [Target],";

/// Closing phrase that ends the email body. Everything from this phrase on
/// is discarded.
pub const BODY_CLOSING: &str = "Call me anytime";

// ---------------------------------------------------------------------------
// Provider pacing
// ---------------------------------------------------------------------------

/// Seconds to wait between consecutive provider calls.
///
/// A fixed cooldown, not adaptive backoff: the provider's per-minute request
/// ceiling is generous enough that a constant pause keeps a sequential batch
/// under it.
pub const DEFAULT_COOLDOWN_SECS: u64 = 3;

/// Hard ceiling on a single provider round-trip. Web-search-augmented
/// completions routinely take tens of seconds; a timeout past that still
/// catches a hung connection.
pub const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Attempts per row before the row is marked failed. Only transient provider
/// errors (rate limit, 5xx) are retried.
pub const CALL_MAX_ATTEMPTS: u32 = 3;

/// Initial delay for the retry backoff schedule.
pub const RETRY_INITIAL_DELAY_MS: u64 = 500;

/// Cap on the retry backoff schedule.
pub const RETRY_MAX_DELAY_SECS: u64 = 8;

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing response bodies in diagnostics.
pub const RESPONSE_PREVIEW_LENGTH: usize = 200;

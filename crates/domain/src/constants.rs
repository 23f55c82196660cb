//! Built-in constants for the default identity provider and storage slots.

/// Issuer used when the host supplies no usable provider configuration.
pub const DEFAULT_ISSUER: &str = "https://auth.argio.ch";

/// Authorize endpoint of the built-in provider.
pub const DEFAULT_AUTHORIZE_ENDPOINT: &str = "https://auth.argio.ch/application/o/authorize/";

/// Token endpoint of the built-in provider.
pub const DEFAULT_TOKEN_ENDPOINT: &str = "https://auth.argio.ch/application/o/token/";

/// Client id of the built-in provider.
pub const DEFAULT_CLIENT_ID: &str = "ch.argio.sso";

/// Scopes requested when the host does not configure any.
pub const DEFAULT_SCOPES: &str = "openid profile email offline_access";

/// OIDC callback URI used when no redirect URI override is configured.
pub const DEFAULT_REDIRECT_URI: &str = "ch.argio.psso://oauth/callback";

/// Audience announced by the platform-SSO login configuration.
pub const PLATFORM_SSO_AUDIENCE: &str = "macos";

/// Keychain service name for every PSSO secret.
pub const KEYCHAIN_SERVICE: &str = "psso";

/// Keychain account holding the single persisted token pair.
pub const TOKEN_ACCOUNT: &str = "default";

/// Keychain account holding forwarded session cookies.
pub const COOKIE_ACCOUNT: &str = "cookies";

/// Upper bound applied to a single token-endpoint call.
pub const DEFAULT_TOKEN_TIMEOUT_SECS: u64 = 30;

/// Settings-bag key holding the provider's additional settings.
pub const ADDITIONAL_SETTINGS_KEY: &str = "AdditionalSettings";

/// Settings-bag key the platform uses for the issuer.
pub const PLATFORM_ISSUER_KEY: &str = "ASAuthorizationProviderExtensionIssuer";

/// Response URL used when a request carries no URL of its own.
pub const FALLBACK_RESPONSE_URL: &str = "https://localhost/";

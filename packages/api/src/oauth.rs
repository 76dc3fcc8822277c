//! OAuth providers offered on the login and register forms.
//!
//! The backend runs the provider flow. The browser is sent to
//! `{base}/oauth/{provider}/authorize?redirect_uri=...` and comes back to the
//! redirect URI with [`TOKEN_PARAM`] and [`USER_DATA_PARAM`] in the query.

/// Query parameter carrying the bearer token on the callback.
pub const TOKEN_PARAM: &str = "oauth_token";
/// Query parameter carrying the URL-encoded user JSON on the callback.
pub const USER_DATA_PARAM: &str = "user_data";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OAuthProvider {
    GitHub,
    Google,
    /// Listed on the forms but not wired up server-side yet.
    FrameSphere,
}

impl OAuthProvider {
    pub const ALL: [OAuthProvider; 3] = [
        OAuthProvider::GitHub,
        OAuthProvider::Google,
        OAuthProvider::FrameSphere,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            OAuthProvider::GitHub => "github",
            OAuthProvider::Google => "google",
            OAuthProvider::FrameSphere => "framesphere",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OAuthProvider::GitHub => "GitHub",
            OAuthProvider::Google => "Google",
            OAuthProvider::FrameSphere => "FrameSphere",
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self, OAuthProvider::FrameSphere)
    }
}

pub fn authorize_url(base_url: &str, provider: OAuthProvider, redirect_uri: &str) -> String {
    format!(
        "{}/oauth/{}/authorize?redirect_uri={}",
        base_url.trim_end_matches('/'),
        provider.slug(),
        urlencoding::encode(redirect_uri)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorize_url() {
        assert_eq!(
            authorize_url(
                "https://api.framespell.de/",
                OAuthProvider::GitHub,
                "https://framespell.de/oauth-callback"
            ),
            "https://api.framespell.de/oauth/github/authorize?redirect_uri=https%3A%2F%2Fframespell.de%2Foauth-callback"
        );
    }

    #[test]
    fn test_availability() {
        assert!(OAuthProvider::Google.is_available());
        assert!(!OAuthProvider::FrameSphere.is_available());
    }
}

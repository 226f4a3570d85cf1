//! Google OAuth2 implicit-flow helpers: the authorization URL the popup is
//! pointed at, and the logout delay derived from the returned lifetime.

use std::time::Duration;

use url::Url;

use crate::config::WidgetConfig;
use crate::models::{OAuthResponse, RenderArgs};

/// Build the authorization URL for the implicit (`response_type=token`) flow.
///
/// The popup is redirected back to `redirect_uri`, which is the widget's own
/// page, so the redirect handler in the popup picks the token up.
pub fn authorization_url(
    config: &WidgetConfig,
    args: &RenderArgs,
    redirect_uri: &str,
) -> Result<String, url::ParseError> {
    let mut url = Url::parse(&config.auth_endpoint)?;
    url.query_pairs_mut()
        .append_pair("client_id", &args.client_id)
        .append_pair("redirect_uri", redirect_uri)
        .append_pair("response_type", "token")
        .append_pair("scope", &args.scopes.join(" "))
        .append_pair("include_granted_scopes", "true")
        .append_pair("state", &config.state_marker);
    Ok(url.into())
}

/// Delay after which the session is dropped: the reported lifetime minus the
/// safety margin, floored at zero.  `None` when `expires_in` is missing or
/// not an integer, in which case no logout is scheduled.
pub fn logout_delay(response: &OAuthResponse, margin: Duration) -> Option<Duration> {
    let lifetime = Duration::from_secs(response.expires_in()?);
    Some(lifetime.saturating_sub(margin))
}

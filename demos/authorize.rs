//! Walks through the front-channel and back-channel legs of the authorization code grant.
//!
//! Run it once to print the authorization URI, then run it again with the `code` query value the
//! provider appended to your redirect URI:
//!
//! ```sh
//! cargo run --example authorize
//! OAUTH_CODE=... OAUTH_STATE=... cargo run --example authorize
//! ```

// std
use std::env;
// crates.io
use color_eyre::{Result, eyre::eyre};
// self
use oauth2_code_client::{
	callback::CallbackResult, flows::AuthCodeClient, provider::ClientConfig, token::TokenPayload,
};

fn main() -> Result<()> {
	color_eyre::install()?;

	let state = env::var("OAUTH_STATE").ok();
	let config = ClientConfig::new(
		"demo-client",
		"https://app.example.com/oauth/callback",
		"https://provider.example.com/authorize",
		"https://provider.example.com/token",
	)
	.with_client_secret("demo-secret")
	.with_scope("openid profile");
	let config = match state {
		Some(state) => config.with_state(state),
		None => config.with_random_state(),
	};
	let mut client = AuthCodeClient::new(config)?;

	client.register_callback(|payload: &TokenPayload| -> CallbackResult {
		println!(
			"Callback received a {} token expiring in {:?}.",
			payload.token_type().unwrap_or("unknown"),
			payload.expires_in()
		);

		Ok(())
	});

	let Ok(code) = env::var("OAUTH_CODE") else {
		println!("Send your user to {}.", client.generate_authentication_uri());
		println!(
			"Re-run with OAUTH_CODE and OAUTH_STATE={} once the provider redirects back.",
			client.identity().state.as_deref().unwrap_or_default()
		);

		return Ok(());
	};
	let payload = client.fetch_access_token(&code)?;
	let refresh_token =
		payload.refresh_token().ok_or_else(|| eyre!("Provider did not issue a refresh token."))?;
	let renewed = client.refresh_access_token(refresh_token)?;

	println!("Refreshed payload carries {} member(s).", renewed.len());

	Ok(())
}

//! User-agent sniffing used to pick the authorization page.

/// Device and browser tokens that mark a user agent as mobile, matched case-insensitively
/// anywhere in the string.
pub const MOBILE_USER_AGENT_TOKENS: [&str; 19] = [
	"android",
	"avantgo",
	"blackberry",
	"bolt",
	"boost",
	"cricket",
	"docomo",
	"fone",
	"hiptop",
	"mini",
	"mobi",
	"palm",
	"phone",
	"pie",
	"tablet",
	"up.browser",
	"up.link",
	"webos",
	"wos",
];

/// Whether `user_agent` contains any of [`MOBILE_USER_AGENT_TOKENS`].
pub fn is_mobile_user_agent(user_agent: &str) -> bool {
	let user_agent = user_agent.to_ascii_lowercase();

	MOBILE_USER_AGENT_TOKENS.iter().any(|token| user_agent.contains(token))
}

pub mod error;
pub mod types;

pub use error::{CocError, Result};
pub use types::{ClanMember, ClanMemberList, Equipment, Hero, League, PlayerProfile, Troop};

use types::ApiErrorBody;

const BASE_URL: &str = "https://api.clashofclans.com/v1";

pub struct CocClient {
    client: reqwest::Client,
    token: String,
    base_url: String,
}

impl CocClient {
    pub fn new(token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            token,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point the client at a different base URL (test servers, proxies that
    /// hold the IP-allowlisted key).
    pub fn with_base_url(token: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            token,
            base_url,
        }
    }

    /// Fetch a full player profile. The tag's leading `#` is URL-encoded.
    pub async fn get_player(&self, tag: &str) -> Result<PlayerProfile> {
        let url = format!("{}/players/{}", self.base_url, encode_tag(tag));
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(api_error(status.as_u16(), resp.text().await.unwrap_or_default()));
        }

        let profile: PlayerProfile = resp.json().await?;
        Ok(profile)
    }

    /// Fetch the current member list of a clan.
    pub async fn get_clan_members(&self, clan_tag: &str) -> Result<Vec<ClanMember>> {
        let url = format!("{}/clans/{}/members", self.base_url, encode_tag(clan_tag));
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(api_error(status.as_u16(), resp.text().await.unwrap_or_default()));
        }

        let list: ClanMemberList = resp.json().await?;
        tracing::debug!(clan = clan_tag, members = list.items.len(), "Fetched clan roster");
        Ok(list.items)
    }
}

/// Player and clan tags embed `#`, which must travel percent-encoded.
fn encode_tag(tag: &str) -> String {
    tag.replace('#', "%23")
}

fn api_error(status: u16, body: String) -> CocError {
    // The API wraps errors in {reason, message}; fall back to the raw body.
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .ok()
        .and_then(|b| b.message.or(b.reason))
        .unwrap_or(body);
    CocError::Api { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_hash_is_percent_encoded() {
        assert_eq!(encode_tag("#2PP0JQL9R"), "%232PP0JQL9R");
        assert_eq!(encode_tag("2PP0JQL9R"), "2PP0JQL9R");
    }

    #[test]
    fn api_error_prefers_structured_message() {
        let err = api_error(404, r#"{"reason":"notFound","message":"Not found"}"#.to_string());
        match err {
            CocError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Not found");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn api_error_falls_back_to_raw_body() {
        let err = api_error(503, "maintenance".to_string());
        match err {
            CocError::Api { message, .. } => assert_eq!(message, "maintenance"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn sparse_profile_deserializes() {
        let json = r##"{"tag":"#ABC","name":"Zap","trophies":2100}"##;
        let profile: PlayerProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.tag, "#ABC");
        assert_eq!(profile.trophies, Some(2100));
        assert!(profile.heroes.is_empty());
        assert!(profile.league.is_none());
    }

    #[test]
    fn profile_sections_deserialize_camel_case() {
        let json = r##"{
            "tag": "#ABC",
            "townHallLevel": 14,
            "warStars": 1200,
            "clanCapitalContributions": 50000,
            "builderHallLevel": 9,
            "builderBaseTrophies": 3100,
            "league": {"id": 29000018, "name": "Crystal League I"},
            "heroes": [{"name": "Barbarian King", "level": 80, "village": "home"}],
            "heroEquipment": [{"name": "Barbarian Puppet", "level": 12}]
        }"##;
        let profile: PlayerProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.town_hall_level, Some(14));
        assert_eq!(profile.clan_capital_contributions, Some(50000));
        assert_eq!(profile.league.as_ref().unwrap().name, "Crystal League I");
        assert_eq!(profile.heroes[0].village.as_deref(), Some("home"));
        assert_eq!(profile.hero_equipment[0].level, 12);
    }
}

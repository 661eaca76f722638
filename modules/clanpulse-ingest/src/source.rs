use anyhow::{Context, Result};
use async_trait::async_trait;

use coc_client::{ClanMember, CocClient, PlayerProfile};

/// Where player data comes from. The live implementation wraps the Clash of
/// Clans API; tests substitute canned profiles.
#[async_trait]
pub trait PlayerSource: Send + Sync {
    async fn clan_members(&self, clan_tag: &str) -> Result<Vec<ClanMember>>;
    async fn player(&self, tag: &str) -> Result<PlayerProfile>;
}

/// Live source over the Clash of Clans REST API.
pub struct CocSource {
    client: CocClient,
}

impl CocSource {
    pub fn new(token: &str) -> Self {
        Self {
            client: CocClient::new(token.to_string()),
        }
    }
}

#[async_trait]
impl PlayerSource for CocSource {
    async fn clan_members(&self, clan_tag: &str) -> Result<Vec<ClanMember>> {
        self.client
            .get_clan_members(clan_tag)
            .await
            .with_context(|| format!("Failed to fetch roster for {clan_tag}"))
    }

    async fn player(&self, tag: &str) -> Result<PlayerProfile> {
        self.client
            .get_player(tag)
            .await
            .with_context(|| format!("Failed to fetch player {tag}"))
    }
}

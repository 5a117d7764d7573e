#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;

use skin_reroll::config::RerollConfig;
use skin_reroll::error::{RerollError, Result};
use skin_reroll::lcu::{LcuResponse, LcuTransport};

/// How the fake answers reroll submissions
#[derive(Debug, Clone)]
pub enum CraftMode {
    /// Accept, consume the submitted shards and reply with this body
    Accept(Value),
    /// Reply with a non-ok status
    Reject(u16),
    /// Fail before any response
    Unreachable,
}

#[derive(Debug)]
struct State {
    loot: Vec<Value>,
    inventory: Vec<Value>,
    catalog: Option<Vec<Value>>,
    ledger_reachable: bool,
    lookups_reachable: bool,
    inventory_reply: Option<(u16, String)>,
    craft: CraftMode,
    submitted: Vec<Vec<String>>,
    gets: Vec<String>,
}

/// In-process stand-in for the game client API
pub struct FakeClient {
    state: Mutex<State>,
}

impl FakeClient {
    pub fn new(loot: Vec<Value>) -> Self {
        Self {
            state: Mutex::new(State {
                loot,
                inventory: Vec::new(),
                catalog: Some(Vec::new()),
                ledger_reachable: true,
                lookups_reachable: true,
                inventory_reply: None,
                craft: CraftMode::Accept(json!({"added": [], "redeemed": []})),
                submitted: Vec::new(),
                gets: Vec::new(),
            }),
        }
    }

    pub fn with_craft(self, craft: CraftMode) -> Self {
        self.state.lock().unwrap().craft = craft;
        self
    }

    pub fn with_inventory(self, inventory: Vec<Value>) -> Self {
        self.state.lock().unwrap().inventory = inventory;
        self
    }

    pub fn with_catalog(self, catalog: Option<Vec<Value>>) -> Self {
        self.state.lock().unwrap().catalog = catalog;
        self
    }

    pub fn with_ledger_unreachable(self) -> Self {
        self.state.lock().unwrap().ledger_reachable = false;
        self
    }

    /// Single-entry ledger lookups fail before any response
    pub fn with_lookups_unreachable(self) -> Self {
        self.state.lock().unwrap().lookups_reachable = false;
        self
    }

    /// Answer the skin inventory request with a fixed status and body
    pub fn with_inventory_reply(self, status: u16, body: &str) -> Self {
        self.state.lock().unwrap().inventory_reply = Some((status, body.to_string()));
        self
    }

    pub fn submitted(&self) -> Vec<Vec<String>> {
        self.state.lock().unwrap().submitted.clone()
    }

    pub fn remaining_loot_ids(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .loot
            .iter()
            .filter_map(|l| l["lootId"].as_str().map(str::to_string))
            .collect()
    }

    pub fn gets(&self) -> Vec<String> {
        self.state.lock().unwrap().gets.clone()
    }
}

#[async_trait]
impl LcuTransport for FakeClient {
    async fn get(&self, path: &str) -> Result<LcuResponse> {
        let mut state = self.state.lock().unwrap();
        state.gets.push(path.to_string());

        if path == "/lol-loot/v1/player-loot" {
            if !state.ledger_reachable {
                return Err(RerollError::Transport("connection refused".into()));
            }
            return Ok(LcuResponse::new(200, Value::Array(state.loot.clone()).to_string()));
        }

        if let Some(loot_id) = path.strip_prefix("/lol-loot/v1/player-loot/") {
            if !state.ledger_reachable || !state.lookups_reachable {
                return Err(RerollError::Transport("connection refused".into()));
            }
            return Ok(match state.loot.iter().find(|l| l["lootId"] == loot_id) {
                Some(entry) => LcuResponse::new(200, entry.to_string()),
                None => LcuResponse::new(404, r#"{"message":"Loot not found"}"#),
            });
        }

        if path == "/lol-inventory/v2/inventory/CHAMPION_SKIN" {
            if let Some((status, body)) = &state.inventory_reply {
                return Ok(LcuResponse::new(*status, body.clone()));
            }
            return Ok(LcuResponse::new(
                200,
                Value::Array(state.inventory.clone()).to_string(),
            ));
        }

        if path == "/lol-catalog/v1/items/CHAMPION_SKIN" {
            return Ok(match &state.catalog {
                Some(catalog) => LcuResponse::new(200, Value::Array(catalog.clone()).to_string()),
                None => LcuResponse::new(500, "catalog offline"),
            });
        }

        Ok(LcuResponse::new(404, "{}"))
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<LcuResponse> {
        assert!(path.starts_with("/lol-loot/v1/recipes/SKIN_reroll/craft?repeat="));

        let ids: Vec<String> = serde_json::from_value(body.clone())?;
        let mut state = self.state.lock().unwrap();
        state.submitted.push(ids.clone());

        match state.craft.clone() {
            CraftMode::Accept(reply) => {
                state
                    .loot
                    .retain(|l| !ids.iter().any(|id| l["lootId"] == id.as_str()));
                Ok(LcuResponse::new(200, reply.to_string()))
            }
            CraftMode::Reject(status) => Ok(LcuResponse::new(
                status,
                r#"{"errorCode":"RPC_ERROR","message":"craft failed"}"#,
            )),
            CraftMode::Unreachable => Err(RerollError::Transport("connection reset".into())),
        }
    }
}

pub fn skin(loot_id: &str, rarity: &str, value: i64, store_item_id: i64) -> Value {
    json!({
        "lootId": loot_id,
        "rarity": rarity,
        "disenchantValue": value,
        "itemDesc": format!("Skin {}", store_item_id),
        "storeItemId": store_item_id,
        "count": 1
    })
}

pub fn config(retry_limit: u32) -> RerollConfig {
    RerollConfig {
        retry_limit,
        inter_iteration_delay_ms: 0,
        ..RerollConfig::default()
    }
}

pub fn counts(batches: &[Vec<String>]) -> HashMap<usize, usize> {
    let mut sizes = HashMap::new();
    for batch in batches {
        *sizes.entry(batch.len()).or_insert(0) += 1;
    }
    sizes
}

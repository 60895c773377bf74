use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use sha2::{Digest, Sha256};
use tokio::fs;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::error::FetchError;
use crate::state::{Move, Record, Stats};

pub const DEFAULT_API_BASE: &str = "https://pokeapi.co/api/v2";
const RECORD_CONCURRENCY: usize = 12;
const UNKNOWN_MOVE_TYPE: &str = "unknown";

#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: String,
    pub page_size: u32,
    pub moves_per_record: usize,
    pub timeout: Duration,
    /// Raw response cache. `None` disables it.
    pub cache_dir: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            page_size: 30,
            moves_per_record: 4,
            timeout: Duration::from_secs(10),
            cache_dir: None,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
struct NamedResource {
    name: String,
    url: String,
}

#[derive(Clone, Debug, Deserialize)]
struct ListResponse {
    results: Vec<NamedResource>,
}

/// `/pokemon/{id}` payload, only the fields a [`Record`] is built from.
#[derive(Clone, Debug, Deserialize)]
pub struct RawPokemon {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub weight: u32,
    #[serde(default)]
    types: Vec<TypeSlot>,
    #[serde(default)]
    stats: Vec<StatSlot>,
    #[serde(default)]
    abilities: Vec<AbilitySlot>,
    #[serde(default)]
    moves: Vec<MoveSlot>,
    #[serde(default)]
    sprites: serde_json::Value,
    cries: Option<Cries>,
    species: Option<NamedResource>,
}

impl RawPokemon {
    pub fn move_names(&self, limit: usize) -> Vec<String> {
        self.moves
            .iter()
            .take(limit)
            .map(|slot| slot.move_info.name.clone())
            .collect()
    }
}

#[derive(Clone, Debug, Deserialize)]
struct TypeSlot {
    #[serde(rename = "type")]
    type_info: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct StatSlot {
    base_stat: u16,
    stat: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct AbilitySlot {
    ability: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct MoveSlot {
    #[serde(rename = "move")]
    move_info: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct Cries {
    latest: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
struct SpeciesResponse {
    evolves_from_species: Option<NamedResource>,
}

#[derive(Clone, Debug, Deserialize)]
struct MoveResponse {
    power: Option<u16>,
    #[serde(rename = "type")]
    type_info: Option<NamedResource>,
}

/// PokeAPI client. Cloning is cheap; clones share the connection pool.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    config: Arc<ApiConfig>,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| FetchError::Network(err.to_string()))?;
        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    pub async fn fetch_one(&self, id: u32) -> Result<Record, FetchError> {
        let url = format!("{}/pokemon/{id}", self.base());
        let raw: RawPokemon = self
            .fetch_json_cached(&url)
            .await?
            .ok_or(FetchError::NotFound(id))?;

        let evolution_from = match raw.species.as_ref() {
            Some(species) => self.fetch_evolution_from(&species.url).await,
            None => None,
        };
        let moves = self
            .fetch_moves(raw.move_names(self.config.moves_per_record))
            .await;
        normalize_record(raw, evolution_from, moves)
    }

    /// Page `n` (1-based). A page past the end of the catalog is empty.
    ///
    /// Every listed record has to load; the first failure fails the page so
    /// the caller never shows a silently shortened page.
    pub async fn fetch_page(&self, page: u32) -> Result<Vec<Record>, FetchError> {
        let page_size = self.config.page_size.max(1);
        let offset = page.saturating_sub(1).saturating_mul(page_size);
        let url = format!(
            "{}/pokemon?offset={offset}&limit={page_size}",
            self.base()
        );
        let list: ListResponse = self
            .fetch_json_cached(&url)
            .await?
            .ok_or_else(|| FetchError::Network(format!("{url}: not found")))?;
        let ids: Vec<u32> = list
            .results
            .iter()
            .filter_map(|entry| trailing_id(&entry.url))
            .collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let (records, failures) = self.fetch_records(&ids).await;
        if let Some((id, err)) = failures.into_iter().next() {
            tracing::warn!(page, id, error = %err, "page record failed");
            return Err(err);
        }
        Ok(records)
    }

    /// Best-effort bulk load used for preloading, in the given order.
    ///
    /// Individual failures are skipped; the call fails only when nothing
    /// could be loaded.
    pub async fn fetch_range(&self, ids: &[u32]) -> Result<Vec<Record>, FetchError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let (records, failures) = self.fetch_records(ids).await;
        for (id, err) in &failures {
            tracing::warn!(id, error = %err, "skipping record");
        }
        if records.is_empty() {
            return Err(failures
                .into_iter()
                .next()
                .map(|(_, err)| err)
                .unwrap_or_else(|| FetchError::Network("no records loaded".to_string())));
        }
        Ok(records)
    }

    /// Fetches every id concurrently. Loaded records keep the input order;
    /// failures come back with their id.
    async fn fetch_records(&self, ids: &[u32]) -> (Vec<Record>, Vec<(u32, FetchError)>) {
        let semaphore = Arc::new(Semaphore::new(RECORD_CONCURRENCY));
        let mut join_set = JoinSet::new();
        for (slot, id) in ids.iter().copied().enumerate() {
            let client = self.clone();
            let semaphore = semaphore.clone();
            join_set.spawn(async move {
                let outcome = match semaphore.acquire_owned().await {
                    Ok(_permit) => client.fetch_one(id).await,
                    Err(_) => Err(FetchError::Network("record semaphore closed".to_string())),
                };
                (slot, outcome)
            });
        }

        let mut slots: Vec<Option<Result<Record, FetchError>>> =
            ids.iter().map(|_| None).collect();
        while let Some(result) = join_set.join_next().await {
            match result {
                Ok((slot, outcome)) => {
                    if let Some(entry) = slots.get_mut(slot) {
                        *entry = Some(outcome);
                    }
                }
                Err(err) => tracing::warn!(error = %err, "record task failed"),
            }
        }

        let mut records = Vec::with_capacity(ids.len());
        let mut failures = Vec::new();
        for (id, slot) in ids.iter().copied().zip(slots) {
            match slot {
                Some(Ok(record)) => records.push(record),
                Some(Err(err)) => failures.push((id, err)),
                None => {
                    let err = FetchError::Network("record task aborted".to_string());
                    failures.push((id, err));
                }
            }
        }
        (records, failures)
    }

    /// Predecessor id from the species resource. Any failure means no lineage.
    async fn fetch_evolution_from(&self, species_url: &str) -> Option<u32> {
        match self.fetch_json_cached::<SpeciesResponse>(species_url).await {
            Ok(Some(species)) => species
                .evolves_from_species
                .and_then(|parent| trailing_id(&parent.url)),
            Ok(None) => None,
            Err(err) => {
                tracing::debug!(url = species_url, error = %err, "species lookup failed");
                None
            }
        }
    }

    async fn fetch_moves(&self, names: Vec<String>) -> Vec<Move> {
        let mut join_set = JoinSet::new();
        for (slot, name) in names.into_iter().enumerate() {
            let client = self.clone();
            join_set.spawn(async move {
                let url = format!("{}/move/{name}", client.base());
                let detail = match client.fetch_json_cached::<MoveResponse>(&url).await {
                    Ok(detail) => detail,
                    Err(err) => {
                        tracing::debug!(name = %name, error = %err, "move lookup failed");
                        None
                    }
                };
                (slot, resolve_move(name, detail))
            });
        }

        let mut moves = Vec::new();
        while let Some(result) = join_set.join_next().await {
            if let Ok(entry) = result {
                moves.push(entry);
            }
        }
        moves.sort_by_key(|(slot, _)| *slot);
        moves.into_iter().map(|(_, entry)| entry).collect()
    }

    fn base(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    /// `Ok(None)` on 404.
    async fn fetch_json_cached<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
    ) -> Result<Option<T>, FetchError> {
        let Some(bytes) = self.fetch_bytes_cached(url).await? else {
            return Ok(None);
        };
        match serde_json::from_slice(&bytes) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                if let Some(path) = self.cache_path(url) {
                    let _ = fs::remove_file(&path).await;
                }
                Err(FetchError::Decode(format!("{url}: {err}")))
            }
        }
    }

    async fn fetch_bytes_cached(&self, url: &str) -> Result<Option<Vec<u8>>, FetchError> {
        let cache_path = self.cache_path(url);
        if let Some(path) = cache_path.as_deref() {
            if let Some(bytes) = read_cache(path).await {
                return Ok(Some(bytes));
            }
        }

        tracing::debug!(url, "GET");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|err| FetchError::Network(err.to_string()))?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = response
            .error_for_status()
            .map_err(|err| FetchError::Network(err.to_string()))?;
        let bytes = response
            .bytes()
            .await
            .map_err(|err| FetchError::Network(err.to_string()))?
            .to_vec();
        if let Some(path) = cache_path.as_deref() {
            write_cache(path, &bytes).await;
        }
        Ok(Some(bytes))
    }

    fn cache_path(&self, url: &str) -> Option<PathBuf> {
        let root = self.config.cache_dir.as_ref()?;
        let mut hasher = Sha256::new();
        hasher.update(url.as_bytes());
        Some(root.join("http").join(hex::encode(hasher.finalize())))
    }
}

/// Builds a [`Record`] from the raw payloads. Fails only when the record has
/// no type, since every record needs a primary type.
pub fn normalize_record(
    raw: RawPokemon,
    evolution_from: Option<u32>,
    moves: Vec<Move>,
) -> Result<Record, FetchError> {
    let types: Vec<String> = raw
        .types
        .into_iter()
        .map(|slot| slot.type_info.name)
        .collect();
    if types.is_empty() {
        return Err(FetchError::Decode(format!("{} has no types", raw.name)));
    }

    let stat = |name: &str| {
        raw.stats
            .iter()
            .find(|slot| slot.stat.name == name)
            .map(|slot| slot.base_stat)
            .unwrap_or(0)
    };
    let stats = Stats {
        hp: stat("hp"),
        attack: stat("attack"),
        defense: stat("defense"),
        speed: stat("speed"),
    };

    let image = pointer_string(&raw.sprites, "/other/official-artwork/front_default")
        .or_else(|| pointer_string(&raw.sprites, "/front_default"))
        .unwrap_or_default();

    Ok(Record {
        id: raw.id,
        name: raw.name,
        image,
        types,
        abilities: raw
            .abilities
            .into_iter()
            .map(|slot| slot.ability.name)
            .collect(),
        stats,
        weight: raw.weight as f32 / 10.0,
        height: raw.height as f32 / 10.0,
        cry: raw.cries.and_then(|cries| cries.latest),
        evolution_from,
        moves,
    })
}

fn resolve_move(name: String, detail: Option<MoveResponse>) -> Move {
    match detail {
        Some(detail) => Move {
            name,
            move_type: detail
                .type_info
                .map(|info| info.name)
                .unwrap_or_else(|| UNKNOWN_MOVE_TYPE.to_string()),
            power: detail.power,
        },
        None => Move {
            name,
            move_type: UNKNOWN_MOVE_TYPE.to_string(),
            power: None,
        },
    }
}

/// Numeric id at the end of a resource url such as `.../pokemon-species/1/`.
pub fn trailing_id(url: &str) -> Option<u32> {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .and_then(|segment| segment.parse().ok())
}

fn pointer_string(value: &serde_json::Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(|val| val.as_str())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

async fn read_cache(path: &Path) -> Option<Vec<u8>> {
    fs::read(path).await.ok()
}

async fn write_cache(path: &Path, bytes: &[u8]) {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent).await;
    }
    if let Err(err) = fs::write(path, bytes).await {
        tracing::debug!(path = %path.display(), error = %err, "response cache write failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn bulbasaur() -> serde_json::Value {
        json!({
            "id": 1,
            "name": "bulbasaur",
            "height": 7,
            "weight": 69,
            "types": [
                { "slot": 1, "type": { "name": "grass", "url": "https://pokeapi.co/api/v2/type/12/" } },
                { "slot": 2, "type": { "name": "poison", "url": "https://pokeapi.co/api/v2/type/4/" } }
            ],
            "stats": [
                { "base_stat": 45, "stat": { "name": "hp", "url": "" } },
                { "base_stat": 49, "stat": { "name": "attack", "url": "" } },
                { "base_stat": 49, "stat": { "name": "defense", "url": "" } },
                { "base_stat": 65, "stat": { "name": "special-attack", "url": "" } },
                { "base_stat": 65, "stat": { "name": "special-defense", "url": "" } },
                { "base_stat": 45, "stat": { "name": "speed", "url": "" } }
            ],
            "abilities": [
                { "ability": { "name": "overgrow", "url": "" } },
                { "ability": { "name": "chlorophyll", "url": "" } }
            ],
            "moves": [
                { "move": { "name": "razor-wind", "url": "" } },
                { "move": { "name": "swords-dance", "url": "" } },
                { "move": { "name": "cut", "url": "" } }
            ],
            "sprites": {
                "front_default": "https://img/front/1.png",
                "other": { "official-artwork": { "front_default": "https://img/art/1.png" } }
            },
            "cries": { "latest": "https://cries/1.ogg", "legacy": null },
            "species": { "name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon-species/1/" }
        })
    }

    #[test]
    fn normalizes_a_full_payload() {
        let raw: RawPokemon = serde_json::from_value(bulbasaur()).unwrap();
        assert_eq!(raw.move_names(2), vec!["razor-wind", "swords-dance"]);

        let record = normalize_record(raw, None, Vec::new()).unwrap();
        assert_eq!(record.id, 1);
        assert_eq!(record.types, vec!["grass", "poison"]);
        assert_eq!(record.abilities, vec!["overgrow", "chlorophyll"]);
        assert_eq!(
            record.stats,
            Stats {
                hp: 45,
                attack: 49,
                defense: 49,
                speed: 45
            }
        );
        assert_eq!(record.image, "https://img/art/1.png");
        assert!((record.height - 0.7).abs() < f32::EPSILON);
        assert!((record.weight - 6.9).abs() < 1e-4);
        assert_eq!(record.cry.as_deref(), Some("https://cries/1.ogg"));
        assert_eq!(record.evolution_from, None);
    }

    #[test]
    fn stats_are_found_by_name_not_position() {
        let mut payload = bulbasaur();
        payload["stats"] = json!([
            { "base_stat": 90, "stat": { "name": "speed", "url": "" } },
            { "base_stat": 35, "stat": { "name": "hp", "url": "" } }
        ]);
        let raw: RawPokemon = serde_json::from_value(payload).unwrap();
        let record = normalize_record(raw, Some(172), Vec::new()).unwrap();
        assert_eq!(record.stats.speed, 90);
        assert_eq!(record.stats.hp, 35);
        assert_eq!(record.stats.attack, 0);
        assert_eq!(record.evolution_from, Some(172));
    }

    #[test]
    fn image_falls_back_to_front_sprite() {
        let mut payload = bulbasaur();
        payload["sprites"]["other"]["official-artwork"]["front_default"] = json!(null);
        let raw: RawPokemon = serde_json::from_value(payload).unwrap();
        let record = normalize_record(raw, None, Vec::new()).unwrap();
        assert_eq!(record.image, "https://img/front/1.png");
    }

    #[test]
    fn record_without_types_is_a_decode_error() {
        let mut payload = bulbasaur();
        payload["types"] = json!([]);
        let raw: RawPokemon = serde_json::from_value(payload).unwrap();
        assert!(matches!(
            normalize_record(raw, None, Vec::new()),
            Err(FetchError::Decode(_))
        ));
    }

    #[test]
    fn unresolved_move_keeps_its_name() {
        let resolved = resolve_move(
            "cut".to_string(),
            Some(MoveResponse {
                power: Some(50),
                type_info: Some(NamedResource {
                    name: "normal".to_string(),
                    url: String::new(),
                }),
            }),
        );
        assert_eq!(resolved.move_type, "normal");
        assert_eq!(resolved.power, Some(50));

        let unresolved = resolve_move("growl".to_string(), None);
        assert_eq!(unresolved.name, "growl");
        assert_eq!(unresolved.move_type, "unknown");
        assert_eq!(unresolved.power, None);
    }

    #[test]
    fn trailing_id_reads_the_last_segment() {
        assert_eq!(
            trailing_id("https://pokeapi.co/api/v2/pokemon-species/133/"),
            Some(133)
        );
        assert_eq!(trailing_id("https://pokeapi.co/api/v2/pokemon/25"), Some(25));
        assert_eq!(trailing_id("https://pokeapi.co/api/v2/pokemon/"), None);
    }

    #[test]
    fn cache_path_requires_a_cache_dir() {
        let client = ApiClient::new(ApiConfig::default()).unwrap();
        assert_eq!(client.cache_path("https://x"), None);

        let dir = tempfile::tempdir().unwrap();
        let client = ApiClient::new(ApiConfig {
            cache_dir: Some(dir.path().to_path_buf()),
            ..ApiConfig::default()
        })
        .unwrap();
        let first = client.cache_path("https://x/1").unwrap();
        assert!(first.starts_with(dir.path().join("http")));
        assert_ne!(Some(first), client.cache_path("https://x/2"));
    }

    #[tokio::test]
    async fn cached_response_is_served_without_network() {
        let dir = tempfile::tempdir().unwrap();
        let client = ApiClient::new(ApiConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            cache_dir: Some(dir.path().to_path_buf()),
            moves_per_record: 0,
            timeout: Duration::from_millis(200),
            ..ApiConfig::default()
        })
        .unwrap();

        let mut payload = bulbasaur();
        payload["species"] = json!(null);
        let url = "http://127.0.0.1:9/pokemon/1";
        let path = client.cache_path(url).unwrap();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, serde_json::to_vec(&payload).unwrap()).unwrap();

        let record = client.fetch_one(1).await.unwrap();
        assert_eq!(record.name, "bulbasaur");
        assert!(record.moves.is_empty());
    }

    #[tokio::test]
    async fn corrupt_cache_entry_is_removed() {
        let dir = tempfile::tempdir().unwrap();
        let client = ApiClient::new(ApiConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            cache_dir: Some(dir.path().to_path_buf()),
            timeout: Duration::from_millis(200),
            ..ApiConfig::default()
        })
        .unwrap();
        let url = "http://127.0.0.1:9/pokemon/2";
        let path = client.cache_path(url).unwrap();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, b"{oops").unwrap();

        assert!(matches!(client.fetch_one(2).await, Err(FetchError::Decode(_))));
        assert!(!path.exists());
    }
    const OFFLINE: &str = "http://127.0.0.1:9";

    fn offline_client(dir: &Path, page_size: u32) -> ApiClient {
        ApiClient::new(ApiConfig {
            base_url: OFFLINE.to_string(),
            page_size,
            moves_per_record: 0,
            timeout: Duration::from_millis(200),
            cache_dir: Some(dir.to_path_buf()),
        })
        .unwrap()
    }

    fn seed(client: &ApiClient, url: &str, body: serde_json::Value) {
        let path = client.cache_path(url).unwrap();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, serde_json::to_vec(&body).unwrap()).unwrap();
    }

    fn seed_pokemon(client: &ApiClient, id: u32, name: &str, parent: Option<u32>) {
        let species_url = format!("{OFFLINE}/pokemon-species/{id}/");
        let mut payload = bulbasaur();
        payload["id"] = json!(id);
        payload["name"] = json!(name);
        payload["species"] = json!({ "name": name, "url": species_url });
        seed(client, &format!("{OFFLINE}/pokemon/{id}"), payload);
        let evolves_from = parent.map(|parent| {
            json!({ "name": "parent", "url": format!("{OFFLINE}/pokemon-species/{parent}/") })
        });
        seed(
            client,
            &species_url,
            json!({ "evolves_from_species": evolves_from }),
        );
    }

    fn seed_list(client: &ApiClient, offset: u32, limit: u32, ids: &[u32]) {
        let results: Vec<serde_json::Value> = ids
            .iter()
            .map(|id| {
                json!({
                    "name": format!("mon-{id}"),
                    "url": format!("{OFFLINE}/pokemon/{id}/")
                })
            })
            .collect();
        seed(
            client,
            &format!("{OFFLINE}/pokemon?offset={offset}&limit={limit}"),
            json!({ "count": 5, "results": results }),
        );
    }

    #[tokio::test]
    async fn page_maps_to_offset_and_keeps_list_order() {
        let dir = tempfile::tempdir().unwrap();
        let client = offline_client(dir.path(), 2);
        seed_list(&client, 2, 2, &[5, 4]);
        seed_pokemon(&client, 4, "charmander", None);
        seed_pokemon(&client, 5, "charmeleon", Some(4));

        let records = client.fetch_page(2).await.unwrap();
        let summary: Vec<(u32, Option<u32>)> = records
            .iter()
            .map(|record| (record.id, record.evolution_from))
            .collect();
        assert_eq!(summary, vec![(5, Some(4)), (4, None)]);
        assert_eq!(records[0].name, "charmeleon");
    }

    #[tokio::test]
    async fn page_past_the_end_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let client = offline_client(dir.path(), 2);
        seed_list(&client, 4, 2, &[]);

        assert_eq!(client.fetch_page(3).await.unwrap(), Vec::new());
    }

    #[tokio::test]
    async fn missing_species_means_no_lineage() {
        let dir = tempfile::tempdir().unwrap();
        let client = offline_client(dir.path(), 2);
        let mut payload = bulbasaur();
        payload["species"] = json!({
            "name": "bulbasaur",
            "url": format!("{OFFLINE}/pokemon-species/1/")
        });
        seed(&client, &format!("{OFFLINE}/pokemon/1"), payload);

        // species lookup hits the unreachable host
        let record = client.fetch_one(1).await.unwrap();
        assert_eq!(record.evolution_from, None);
    }

    #[tokio::test]
    async fn page_fails_when_one_record_cannot_load() {
        let dir = tempfile::tempdir().unwrap();
        let client = offline_client(dir.path(), 2);
        seed_list(&client, 0, 2, &[1, 2]);
        seed_pokemon(&client, 1, "bulbasaur", None);

        assert!(matches!(
            client.fetch_page(1).await,
            Err(FetchError::Network(_))
        ));

        let preloaded = client.fetch_range(&[1, 2]).await.unwrap();
        let ids: Vec<u32> = preloaded.iter().map(|record| record.id).collect();
        assert_eq!(ids, vec![1]);
    }
}


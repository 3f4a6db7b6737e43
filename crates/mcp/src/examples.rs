//! Curated query examples, search patterns and workflows for the STRATZ
//! Dota 2 API.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Keyword groups that tend to find related fields together.
pub const SEARCH_PATTERNS: &[(&str, &[&str])] = &[
    ("player", &["player", "steam", "account", "profile", "user"]),
    (
        "playerStats",
        &["winrate", "matches", "performance", "ranking", "mmr", "behavior"],
    ),
    ("match", &["match", "game", "duration", "winner", "radiant", "dire"]),
    (
        "matchDetails",
        &["players", "heroes", "items", "builds", "picks", "bans"],
    ),
    ("hero", &["hero", "character", "champion", "abilities", "talents"]),
    (
        "heroStats",
        &["winrate", "popularity", "meta", "performance", "counters"],
    ),
    (
        "league",
        &["league", "tournament", "professional", "esports", "competition"],
    ),
    (
        "leagueData",
        &["teams", "matches", "standings", "bracket", "schedule"],
    ),
];

const MAX_SUGGESTIONS: usize = 8;
const MAX_CONTEXTUAL_EXAMPLES: usize = 2;

#[derive(Debug, Clone, Copy)]
pub struct QueryExample {
    pub description: &'static str,
    pub keywords: &'static [&'static str],
    pub query: &'static str,
    pub variables: &'static str,
    pub notes: &'static str,
}

pub const QUERY_EXAMPLES: &[QueryExample] = &[
    QueryExample {
        description: "Get basic player information and statistics",
        keywords: &["player", "steam", "profile"],
        query: r"query GetPlayer($steamId: Long!) {
  player(steamAccountId: $steamId) {
    steamAccount {
      name
      avatar
      profileUri
    }
    matchCount
    winCount
    imp
    # More fields available - use search-schema to discover
  }
}",
        variables: r#"{"steamId": "123456789"}"#,
        notes: "Replace steamId with actual Steam ID (32-bit format)",
    },
    QueryExample {
        description: "Analyze player performance with specific heroes",
        keywords: &["player", "hero", "performance", "winrate"],
        query: r"query GetPlayerHeroes($steamId: Long!, $take: Int = 10) {
  player(steamAccountId: $steamId) {
    heroesPerformance(take: $take) {
      hero {
        displayName
        shortName
      }
      matchCount
      winCount
      avgImp
      # Use introspect-type on HeroPerformanceType for more fields
    }
  }
}",
        variables: r#"{"steamId": "123456789", "take": 10}"#,
        notes: "Shows top heroes by match count with win statistics",
    },
    QueryExample {
        description: "Get comprehensive match information",
        keywords: &["match", "players", "heroes", "duration"],
        query: r#"query GetMatch($matchId: Long!) {
  match(id: $matchId) {
    durationSeconds
    didRadiantWin
    gameMode
    startDateTime
    players {
      steamAccount { name }
      hero { displayName }
      kills
      deaths
      assists
      networth
      level
      # Much more available - search for "player", "stats"
    }
  }
}"#,
        variables: r#"{"matchId": "7891234567"}"#,
        notes: "Use 64-bit match ID from match history",
    },
    QueryExample {
        description: "Get hero popularity and win rate statistics",
        keywords: &["hero", "winrate", "popularity", "meta"],
        query: r#"query GetHeroStats($heroId: Short, $bracket: RankBracket) {
  heroStats {
    heroVsHeroMatchup(heroId: $heroId, bracket: $bracket) {
      hero { displayName }
      winCount
      matchCount
      # Search for "advantage", "matchup" for more fields
    }
  }
}"#,
        variables: r#"{"heroId": 1, "bracket": "DIVINE_IMMORTAL"}"#,
        notes: "Analyze hero performance in different skill brackets",
    },
];

pub const WORKFLOWS: &[(&str, &[&str])] = &[
    (
        "playerAnalysis",
        &[
            r#"search-schema(keywords: ["player", "steam"])"#,
            "query-graphql(query: playerBasicInfo template)",
            r#"search-schema(keywords: ["player", "hero", "performance"])"#,
            "query-graphql(query: playerHeroPerformance template)",
        ],
    ),
    (
        "matchAnalysis",
        &[
            r#"search-schema(keywords: ["match", "duration", "players"])"#,
            "query-graphql(query: matchDetails template)",
            r#"search-schema(keywords: ["match", "items", "builds"])"#,
            r#"introspect-type(typeName: "MatchPlayerType", maxDepth: 2)"#,
        ],
    ),
    (
        "heroResearch",
        &[
            r#"search-schema(keywords: ["hero", "stats", "winrate"])"#,
            r#"introspect-type(typeName: "HeroType", maxDepth: 2)"#,
            r#"search-schema(keywords: ["hero", "matchup", "advantage"])"#,
            "query-graphql(query: heroMetaStats template)",
        ],
    ),
];

pub const STEAM_ID_NOTES: &str = "Steam ID Formats:
- Steam3 ID: [U:1:123456789] -> Use 123456789
- Steam64 ID: 76561198083722517 -> Convert to 32-bit: subtract 76561197960265728
- Steam Community URL: /profiles/76561198083722517/ -> Extract and convert
- Profile URL: /id/customname/ -> Need to resolve to Steam ID first
";

pub const COMMON_ERRORS: &[(&str, &str)] = &[
    (
        "Player not found",
        "Check Steam ID format (use 32-bit account ID)",
    ),
    ("Match not found", "Verify match ID is correct 64-bit format"),
    (
        "Field does not exist",
        "Use search-schema to find correct field names",
    ),
    (
        "Authentication required",
        "Some data requires valid API token in headers",
    ),
];

/// Which part of the catalog `get-query-examples` returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExampleCategory {
    Player,
    Match,
    Hero,
    League,
    Workflow,
    #[default]
    All,
}

impl ExampleCategory {
    fn includes(self, other: Self) -> bool {
        self == Self::All || self == other
    }
}

/// Keywords from every search pattern that shares a word with `text`,
/// deduplicated and capped at eight.
pub fn suggest_keywords(text: &str) -> Vec<&'static str> {
    let text = text.to_lowercase();
    let mut suggestions: Vec<&'static str> = Vec::new();
    for (_, keywords) in SEARCH_PATTERNS {
        if keywords.iter().any(|k| text.contains(k)) {
            for keyword in *keywords {
                if !suggestions.contains(keyword) {
                    suggestions.push(*keyword);
                }
            }
        }
    }
    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}

/// Up to two examples whose keywords appear in any of the search keywords.
pub fn contextual_examples<S: AsRef<str>>(keywords: &[S]) -> Vec<&'static QueryExample> {
    let keywords: Vec<String> = keywords.iter().map(|k| k.as_ref().to_lowercase()).collect();
    QUERY_EXAMPLES
        .iter()
        .filter(|example| {
            example
                .keywords
                .iter()
                .any(|ek| keywords.iter().any(|k| k.contains(ek)))
        })
        .take(MAX_CONTEXTUAL_EXAMPLES)
        .collect()
}

/// The `get-query-examples` text for `category`.
pub fn render_examples(category: ExampleCategory) -> String {
    let mut out = String::new();

    if category.includes(ExampleCategory::Workflow) {
        out.push_str("=== Recommended Workflows ===\n");
        for (name, steps) in WORKFLOWS {
            let _ = writeln!(out, "\n{}:", name.to_uppercase());
            for (i, step) in steps.iter().enumerate() {
                let _ = writeln!(out, "{}. {step}", i + 1);
            }
        }
    }

    let sections = [
        (ExampleCategory::Player, "Player Analysis", "player"),
        (ExampleCategory::Match, "Match Analysis", "match"),
        (ExampleCategory::Hero, "Hero Research", "hero"),
    ];
    for (section, title, keyword) in sections {
        if !category.includes(section) {
            continue;
        }
        let _ = writeln!(out, "\n=== {title} Examples ===");
        for example in QUERY_EXAMPLES.iter().filter(|e| e.keywords.contains(&keyword)) {
            let _ = writeln!(
                out,
                "\n{}:\n{}\nVariables: {}\nNotes: {}",
                example.description, example.query, example.variables, example.notes
            );
        }
    }

    if category == ExampleCategory::League {
        out.push_str(
            "\n=== League Data ===\nNo curated league queries yet. Try search-schema with: ",
        );
        out.push_str(&league_keywords().join(", "));
        out.push('\n');
    }

    let _ = write!(out, "\n=== Steam ID Notes ===\n{STEAM_ID_NOTES}");
    out.push_str("\n=== Common Errors & Solutions ===\n");
    for (error, solution) in COMMON_ERRORS {
        let _ = writeln!(out, "- {error}: {solution}");
    }
    out
}

/// Keywords of the named search pattern group.
pub fn pattern(name: &str) -> &'static [&'static str] {
    match SEARCH_PATTERNS.iter().find(|(group, _)| *group == name) {
        Some((_, keywords)) => *keywords,
        None => &[],
    }
}

fn league_keywords() -> Vec<&'static str> {
    let mut keywords = pattern("league").to_vec();
    keywords.extend_from_slice(pattern("leagueData"));
    keywords
}

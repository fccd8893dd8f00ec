//! Static mood configuration
//!
//! Maps every id of the three mood dimensions to the keywords, categories and
//! page ranges that drive query building and scoring. Built once per process
//! and never mutated.

use crate::error::{ApiError, Result};
use crate::models::{MoodOption, MoodOptionsResponse};
use lazy_static::lazy_static;
use std::fmt;

/// One of the three axes of a mood selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoodDimension {
    Energy,
    Genre,
    Depth,
}

impl MoodDimension {
    /// Name of the request field carrying this dimension's id
    pub fn field_name(&self) -> &'static str {
        match self {
            MoodDimension::Energy => "energyId",
            MoodDimension::Genre => "genreId",
            MoodDimension::Depth => "depthId",
        }
    }
}

impl fmt::Display for MoodDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MoodDimension::Energy => "energy",
            MoodDimension::Genre => "genre",
            MoodDimension::Depth => "depth",
        };
        f.write_str(name)
    }
}

/// Inclusive page-count window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    pub min: u32,
    pub max: u32,
}

impl PageRange {
    pub fn contains(&self, pages: u32) -> bool {
        (self.min..=self.max).contains(&pages)
    }
}

/// Resolved configuration for one dimension value
#[derive(Debug, Clone)]
pub struct MoodCriteria {
    pub id: &'static str,
    pub title: &'static str,
    pub emoji: &'static str,
    pub color: &'static str,
    pub description: &'static str,
    /// Search terms for genres, pace words for energy, tone words for depth
    pub keywords: Vec<&'static str>,
    /// Target categories for genres, themes for energy
    pub categories: Vec<&'static str>,
    pub page_range: Option<PageRange>,
    /// Tag attached to every recommended book for this value
    pub mood_tag: Option<&'static str>,
}

impl MoodCriteria {
    fn option(&self) -> MoodOption {
        MoodOption {
            id: self.id.to_string(),
            title: self.title.to_string(),
            emoji: self.emoji.to_string(),
            description: self.description.to_string(),
            color: self.color.to_string(),
        }
    }
}

pub struct MoodTable {
    energy: Vec<MoodCriteria>,
    genre: Vec<MoodCriteria>,
    depth: Vec<MoodCriteria>,
}

impl MoodTable {
    /// All values of a dimension, in presentation order
    pub fn options(&self, dimension: MoodDimension) -> &[MoodCriteria] {
        match dimension {
            MoodDimension::Energy => &self.energy,
            MoodDimension::Genre => &self.genre,
            MoodDimension::Depth => &self.depth,
        }
    }

    pub fn contains(&self, dimension: MoodDimension, id: &str) -> bool {
        self.options(dimension).iter().any(|c| c.id == id)
    }

    pub fn lookup(&self, dimension: MoodDimension, id: &str) -> Result<&MoodCriteria> {
        self.options(dimension)
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| {
                ApiError::ConfigurationError(format!("No {} mood with id '{}'", dimension, id))
            })
    }

    pub fn options_response(&self) -> MoodOptionsResponse {
        let collect = |dimension: MoodDimension| -> Vec<MoodOption> {
            self.options(dimension)
                .iter()
                .map(MoodCriteria::option)
                .collect()
        };

        MoodOptionsResponse {
            energy: collect(MoodDimension::Energy),
            genre: collect(MoodDimension::Genre),
            depth: collect(MoodDimension::Depth),
        }
    }

    fn builtin() -> Self {
        let energy = vec![
            MoodCriteria {
                id: "high",
                title: "High Energy",
                emoji: "⚡",
                color: "#FF6B6B",
                description: "Fast-paced page-turners that keep you hooked",
                keywords: vec!["thriller", "action", "adventure", "suspense", "fast-paced"],
                categories: vec!["Thriller", "Action", "Adventure"],
                page_range: None,
                mood_tag: Some("Fast-paced"),
            },
            MoodCriteria {
                id: "medium",
                title: "Balanced",
                emoji: "🌤️",
                color: "#FFB84D",
                description: "Engaging stories at a comfortable pace",
                keywords: vec!["engaging", "compelling", "story", "journey"],
                categories: vec!["Literary", "Contemporary"],
                page_range: None,
                mood_tag: None,
            },
            MoodCriteria {
                id: "low",
                title: "Relaxed",
                emoji: "🌙",
                color: "#7C83FD",
                description: "Gentle, cozy reads to unwind with",
                keywords: vec!["cozy", "gentle", "heartwarming", "calm", "peaceful"],
                categories: vec!["Family", "Humor", "Friendship"],
                page_range: None,
                mood_tag: Some("Relaxing"),
            },
        ];

        let genre = vec![
            MoodCriteria {
                id: "fiction",
                title: "Fiction",
                emoji: "📖",
                color: "#4ECDC4",
                description: "Character-driven literary and contemporary novels",
                keywords: vec!["literary fiction", "contemporary fiction", "novel"],
                categories: vec!["Fiction", "Literary", "Contemporary"],
                page_range: None,
                mood_tag: None,
            },
            MoodCriteria {
                id: "mystery",
                title: "Mystery",
                emoji: "🔍",
                color: "#5D5C61",
                description: "Puzzles, detectives and crimes to solve",
                keywords: vec!["mystery", "detective", "crime", "thriller"],
                categories: vec!["Mystery", "Detective", "Crime", "Thriller"],
                page_range: None,
                mood_tag: None,
            },
            MoodCriteria {
                id: "romance",
                title: "Romance",
                emoji: "💕",
                color: "#FF8FAB",
                description: "Love stories and relationships",
                keywords: vec!["romance", "love story", "romantic comedy"],
                categories: vec!["Romance", "Love", "Relationships"],
                page_range: None,
                mood_tag: None,
            },
            MoodCriteria {
                id: "scifi",
                title: "Sci-Fi",
                emoji: "🚀",
                color: "#3A86FF",
                description: "Future worlds, space and technology",
                keywords: vec!["science fiction", "space opera", "dystopian", "cyberpunk"],
                categories: vec!["Science Fiction", "Space", "Dystopian"],
                page_range: None,
                mood_tag: None,
            },
            MoodCriteria {
                id: "nonfiction",
                title: "Non-Fiction",
                emoji: "🧠",
                color: "#2EC4B6",
                description: "True stories, ideas and real-world knowledge",
                keywords: vec!["biography", "history", "self-help", "popular science"],
                categories: vec!["Biography", "History", "Self-Help", "Science"],
                page_range: None,
                mood_tag: None,
            },
            MoodCriteria {
                id: "fantasy",
                title: "Fantasy",
                emoji: "🐉",
                color: "#9B5DE5",
                description: "Magic, myth and other worlds",
                keywords: vec!["fantasy", "epic fantasy", "magic", "dragons"],
                categories: vec!["Fantasy", "Magic", "Mythology"],
                page_range: None,
                mood_tag: None,
            },
        ];

        let depth = vec![
            MoodCriteria {
                id: "light",
                title: "Light & Easy",
                emoji: "☁️",
                color: "#A0E7E5",
                description: "Quick, breezy reads",
                keywords: vec!["fun", "light", "easy", "quick", "entertaining"],
                categories: Vec::new(),
                page_range: Some(PageRange { min: 50, max: 300 }),
                mood_tag: Some("Easy Read"),
            },
            MoodCriteria {
                id: "medium",
                title: "Balanced Depth",
                emoji: "📚",
                color: "#B4F8C8",
                description: "Substantial but accessible",
                keywords: vec!["thoughtful", "meaningful", "insightful", "rich"],
                categories: Vec::new(),
                page_range: Some(PageRange { min: 200, max: 450 }),
                mood_tag: None,
            },
            MoodCriteria {
                id: "deep",
                title: "Deep & Complex",
                emoji: "🌊",
                color: "#355C7D",
                description: "Layered, demanding, rewarding",
                keywords: vec!["profound", "complex", "philosophical", "epic", "layered"],
                categories: Vec::new(),
                page_range: Some(PageRange {
                    min: 350,
                    max: 1500,
                }),
                mood_tag: Some("Complex"),
            },
        ];

        Self {
            energy,
            genre,
            depth,
        }
    }
}

/// The three criteria records of one validated mood selection
#[derive(Debug, Clone, Copy)]
pub struct ResolvedMood {
    pub energy: &'static MoodCriteria,
    pub genre: &'static MoodCriteria,
    pub depth: &'static MoodCriteria,
}

impl ResolvedMood {
    pub fn resolve(energy_id: &str, genre_id: &str, depth_id: &str) -> Result<Self> {
        Ok(Self {
            energy: lookup(MoodDimension::Energy, energy_id)?,
            genre: lookup(MoodDimension::Genre, genre_id)?,
            depth: lookup(MoodDimension::Depth, depth_id)?,
        })
    }
}

lazy_static! {
    /// Process-wide mood configuration
    pub static ref MOOD_TABLE: MoodTable = MoodTable::builtin();
}

/// Resolve one dimension id against the process-wide table
pub fn lookup(dimension: MoodDimension, id: &str) -> Result<&'static MoodCriteria> {
    MOOD_TABLE.lookup(dimension, id)
}

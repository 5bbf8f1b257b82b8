// file: src/parser/dependency.rs
// description: dependency parse model and the parser collaborator interface
// reference: Universal Dependencies labels as emitted by common NLP toolkits

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// One token of a parsed sentence. `head` indexes the governing token; the
/// root has no head (or points at itself).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Token {
    pub text: String,
    pub pos: String,
    pub lemma: String,
    pub dep: String,
    #[serde(default)]
    pub head: Option<usize>,
    #[serde(default = "default_space_after")]
    pub space_after: bool,
}

fn default_space_after() -> bool {
    true
}

impl Token {
    pub fn is_verb(&self) -> bool {
        self.pos == "VERB"
    }

    pub fn is_root(&self) -> bool {
        self.dep == "ROOT"
    }
}

/// Token arena for one sentence. Children are derived from `head` indices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ParsedSentence {
    pub tokens: Vec<Token>,
}

impl ParsedSentence {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    fn head_of(&self, index: usize) -> Option<usize> {
        self.tokens
            .get(index)?
            .head
            .filter(|head| *head != index && *head < self.tokens.len())
    }

    /// Direct syntactic children of `index`, in sentence order.
    pub fn children(&self, index: usize) -> Vec<usize> {
        (0..self.tokens.len())
            .filter(|candidate| self.head_of(*candidate) == Some(index))
            .collect()
    }

    pub fn child_with_dep(&self, index: usize, deps: &[&str]) -> Option<usize> {
        self.children(index)
            .into_iter()
            .find(|child| deps.contains(&self.tokens[*child].dep.as_str()))
    }

    fn dominates(&self, ancestor: usize, index: usize) -> bool {
        let mut current = index;
        // head chains are bounded by sentence length even if the input has a cycle
        for _ in 0..=self.tokens.len() {
            if current == ancestor {
                return true;
            }
            match self.head_of(current) {
                Some(head) => current = head,
                None => return false,
            }
        }
        false
    }

    /// Text covered by the subtree rooted at `index`, from its leftmost to its
    /// rightmost descendant.
    pub fn subtree_span(&self, index: usize) -> Option<String> {
        if index >= self.tokens.len() {
            return None;
        }

        let members: Vec<usize> = (0..self.tokens.len())
            .filter(|candidate| self.dominates(index, *candidate))
            .collect();
        let start = *members.first()?;
        let end = *members.last()?;

        let mut span = String::new();
        for (offset, token) in self.tokens[start..=end].iter().enumerate() {
            span.push_str(&token.text);
            if token.space_after && start + offset < end {
                span.push(' ');
            }
        }

        Some(span)
    }
}

/// External sentence parser. Implementations must be shareable across the
/// worker pool.
pub trait DependencyParser: Send + Sync {
    fn parse(&self, sentence: &str) -> Result<ParsedSentence>;

    fn name(&self) -> &'static str;
}

/// Parser used when no parses are available; dependency extraction yields nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullParser;

impl DependencyParser for NullParser {
    fn parse(&self, _sentence: &str) -> Result<ParsedSentence> {
        Ok(ParsedSentence::empty())
    }

    fn name(&self) -> &'static str {
        "null"
    }
}

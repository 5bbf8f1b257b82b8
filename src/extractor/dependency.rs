// file: src/extractor/dependency.rs
// description: dependency-parse strategy reading subject and object spans around action verbs
// reference: Universal Dependencies relations nsubj, nsubjpass, agent, dobj, obj, prep, pobj

use crate::config::DependencyScope;
use crate::extractor::actors::{find_cve, normalize_actor, normalize_object};
use crate::extractor::strategy::SentenceContext;
use crate::extractor::vocabulary::ACTION_LEMMAS;
use crate::models::{Event, ExtractionMethod};
use crate::parser::{ParsedSentence, Token};

const SUBJECT_DEPS: &[&str] = &["nsubj", "nsubjpass"];
const DIRECT_OBJECT_DEPS: &[&str] = &["dobj", "obj", "pobj"];

pub fn extract(ctx: &SentenceContext<'_>) -> Vec<Event> {
    let parse = ctx.parse;
    if parse.is_empty() {
        return Vec::new();
    }

    // Sentence-level, so computed once for every predicate.
    let cve = find_cve(ctx.text);

    parse
        .tokens
        .iter()
        .enumerate()
        .filter(|(_, token)| is_action_predicate(token, ctx.scope))
        .filter_map(|(index, token)| {
            let roles = read_roles(parse, index);

            let object = cve.clone().or(roles.object);
            let actor = normalize_actor(roles.actor, ctx.text)?;

            Some(Event::new(
                Some(actor),
                Some(token.lemma.to_lowercase()),
                normalize_object(object),
                ExtractionMethod::DependencyParse,
            ))
        })
        .collect()
}

fn is_action_predicate(token: &Token, scope: DependencyScope) -> bool {
    if !token.is_verb() || !ACTION_LEMMAS.contains(&token.lemma.to_lowercase().as_str()) {
        return false;
    }

    match scope {
        DependencyScope::Root => token.is_root(),
        DependencyScope::AllVerbs => true,
    }
}

struct Roles {
    actor: Option<String>,
    object: Option<String>,
}

fn read_roles(parse: &ParsedSentence, verb: usize) -> Roles {
    let subject = parse.child_with_dep(verb, SUBJECT_DEPS);
    let agent = parse
        .child_with_dep(verb, &["agent"])
        .and_then(|agent| parse.child_with_dep(agent, &["pobj"]));

    let mut object = direct_object(parse, verb).or_else(|| prepositional_object(parse, verb));

    let actor = match agent {
        // "X was deployed by Y": Y acts, X is acted upon.
        Some(agent_object) => {
            if object.is_none() {
                object = subject
                    .filter(|s| parse.tokens[*s].dep == "nsubjpass")
                    .and_then(|s| parse.subtree_span(s));
            }
            parse.subtree_span(agent_object)
        }
        None => subject.and_then(|s| parse.subtree_span(s)),
    };

    Roles { actor, object }
}

fn is_usable_object(parse: &ParsedSentence, index: usize) -> bool {
    parse.tokens[index].pos != "NUM"
}

fn direct_object(parse: &ParsedSentence, verb: usize) -> Option<String> {
    parse
        .children(verb)
        .into_iter()
        .find(|child| {
            DIRECT_OBJECT_DEPS.contains(&parse.tokens[*child].dep.as_str())
                && is_usable_object(parse, *child)
        })
        .and_then(|child| parse.subtree_span(child))
}

fn prepositional_object(parse: &ParsedSentence, verb: usize) -> Option<String> {
    parse
        .children(verb)
        .into_iter()
        .filter(|child| parse.tokens[*child].dep == "prep")
        .flat_map(|prep| parse.children(prep))
        .find(|grandchild| {
            parse.tokens[*grandchild].dep == "pobj" && is_usable_object(parse, *grandchild)
        })
        .and_then(|grandchild| parse.subtree_span(grandchild))
}

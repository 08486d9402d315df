use std::convert::Infallible;
use std::sync::Arc;

use serde::Serialize;
use warp::http::StatusCode;
use warp::reply::{self, Response};
use warp::{Filter, Rejection, Reply};

use dealer_engine::cards::Card;
use dealer_engine::rules::{self, DEFAULT_HAND_SIZE, DEFAULT_MULTI_DEAL};

use crate::dealer::DeckManager;
use crate::errors::{ErrorResponse, IntoErrorResponse};
use crate::middleware;

/// One element of the multi-hand response: the 0-based position of the hand
/// in the request, and its cards in dealing order.
#[derive(Debug, Serialize)]
pub struct HandReply {
    pub hand: usize,
    pub cards: Vec<Card>,
}

/// GET /dealer/hand?cards=N
///
/// Deals a single hand from the shared deck. `cards` defaults to 5 and must
/// lie in 1..=52.
pub fn deal_hand(
    deck: Arc<DeckManager>,
) -> impl Filter<Extract = (Response,), Error = Rejection> + Clone {
    warp::path!("dealer" / "hand")
        .and(warp::get())
        .and(middleware::require_json())
        .and(warp::query::<Vec<(String, String)>>())
        .and(with_deck(deck))
        .and_then(
            |query: Vec<(String, String)>, deck: Arc<DeckManager>| async move {
                Ok::<_, Infallible>(handle_deal_hand(&query, deck))
            },
        )
}

/// GET /dealer/hands?cards=N&cards=M...
///
/// Deals one hand per `cards` value, in request order, from the one shared
/// deck. With no `cards` values the request means four 13-card hands. The
/// whole request is validated before any card moves.
pub fn deal_hands(
    deck: Arc<DeckManager>,
) -> impl Filter<Extract = (Response,), Error = Rejection> + Clone {
    warp::path!("dealer" / "hands")
        .and(warp::get())
        .and(middleware::require_json())
        .and(warp::query::<Vec<(String, String)>>())
        .and(with_deck(deck))
        .and_then(
            |query: Vec<(String, String)>, deck: Arc<DeckManager>| async move {
                Ok::<_, Infallible>(handle_deal_hands(&query, deck))
            },
        )
}

fn with_deck(
    deck: Arc<DeckManager>,
) -> impl Filter<Extract = (Arc<DeckManager>,), Error = Infallible> + Clone {
    warp::any().map(move || Arc::clone(&deck))
}

fn handle_deal_hand(query: &[(String, String)], deck: Arc<DeckManager>) -> Response {
    let size = match single_hand_size(query) {
        Ok(size) => size,
        Err(response) => return response,
    };
    match deck.deal(size) {
        Ok(cards) => reply::json(&cards).into_response(),
        Err(err) => err.into_http_response(),
    }
}

fn handle_deal_hands(query: &[(String, String)], deck: Arc<DeckManager>) -> Response {
    let sizes = match multi_hand_sizes(query) {
        Ok(sizes) => sizes,
        Err(response) => return response,
    };
    match deck.deal_many(&sizes) {
        Ok(hands) => {
            let body: Vec<HandReply> = hands
                .into_iter()
                .enumerate()
                .map(|(hand, cards)| HandReply { hand, cards })
                .collect();
            reply::json(&body).into_response()
        }
        Err(err) => err.into_http_response(),
    }
}

/// First `cards` value, defaulting to 5, bounds-checked.
fn single_hand_size(query: &[(String, String)]) -> Result<usize, Response> {
    let size = match first_cards_value(query) {
        None => DEFAULT_HAND_SIZE,
        Some(raw) => parse_size(raw)?,
    };
    rules::validate_hand_size(size).map_err(IntoErrorResponse::into_http_response)?;
    Ok(size)
}

/// Every `cards` value in order, defaulting to four 13-card hands, with the
/// whole list bounds- and capacity-checked before any dealing.
fn multi_hand_sizes(query: &[(String, String)]) -> Result<Vec<usize>, Response> {
    let mut sizes = Vec::new();
    for (key, value) in query {
        if key.as_str() == "cards" {
            sizes.push(parse_size(value)?);
        }
    }
    if sizes.is_empty() {
        sizes.extend(DEFAULT_MULTI_DEAL);
    }
    rules::validate_hand_sizes(&sizes).map_err(IntoErrorResponse::into_http_response)?;
    Ok(sizes)
}

fn first_cards_value(query: &[(String, String)]) -> Option<&str> {
    query
        .iter()
        .find(|(key, _)| key.as_str() == "cards")
        .map(|(_, value)| value.as_str())
}

fn parse_size(raw: &str) -> Result<usize, Response> {
    raw.parse::<usize>().map_err(|_| {
        ErrorResponse::new(
            "invalid_request",
            format!("`cards` must be an integer, got `{raw}`"),
        )
        .into_response(StatusCode::BAD_REQUEST)
    })
}

//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The cookie session holds two things: the authenticated user's id and the
//! per-session upstream token state. Handlers load the token state, hand it
//! to a service as `&mut`, and persist it back before returning so a token
//! acquired during a failed request is not thrown away.

use actix_session::Session;
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, SessionTokens, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const TOKENS_KEY: &str = "petfinder_tokens";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated user's id in the session cookie.
    pub fn persist_user(&self, user_id: &UserId) -> Result<(), Error> {
        self.0
            .insert(USER_ID_KEY, user_id.to_string())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the current user id from the session, if present.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let id = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        match id {
            Some(raw) => match UserId::parse(&raw) {
                Ok(id) => Ok(Some(id)),
                Err(error) => {
                    tracing::warn!("invalid user id in session cookie: {error}");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Require an authenticated user id or return `401 Unauthorized`.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.user_id()?
            .ok_or_else(|| Error::unauthenticated("login required"))
    }

    /// Drop the authenticated user from the session.
    pub fn forget_user(&self) {
        self.0.remove(USER_ID_KEY);
    }

    /// Load the session's upstream token state, empty if none stored yet.
    ///
    /// An unreadable stored value is treated as empty; the next upstream call
    /// simply acquires a fresh token.
    pub fn tokens(&self) -> SessionTokens {
        match self.0.get::<SessionTokens>(TOKENS_KEY) {
            Ok(Some(tokens)) => tokens,
            Ok(None) => SessionTokens::new(),
            Err(error) => {
                tracing::warn!("invalid token state in session cookie: {error}");
                SessionTokens::new()
            }
        }
    }

    /// Persist the upstream token state back into the session cookie.
    pub fn persist_tokens(&self, tokens: &SessionTokens) -> Result<(), Error> {
        self.0
            .insert(TOKENS_KEY, tokens)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Clear the whole session: user id and token state alike.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

use tenancy::actor::{Actor, ActorDto};

/// Request-scoped session, dropped with the request
#[derive(Clone)]
pub struct Ctx {
    pub actor: Actor,
    pub token: Option<String>,
}

impl Ctx {
    pub fn new(actor: Actor, token: Option<String>) -> Self {
        Ctx { actor, token }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn actor(&self) -> Option<&ActorDto> {
        self.actor.actor.as_ref()
    }
}

use serde::{Deserialize, Serialize};

/// Identity of a signed-in account as reported by the identity provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorDto {
    /// Identity subject, also the id of the matching user profile
    pub id: String,
    pub email: String,
}

/// Whoever is making the current request, possibly nobody
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Actor {
    pub actor: Option<ActorDto>,
}

impl Actor {
    pub fn new(actor: ActorDto) -> Self {
        Actor { actor: Some(actor) }
    }

    pub fn is_authenticated(&self) -> bool {
        self.actor.is_some()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.actor.as_ref().map(|a| a.id.as_str())
    }
}

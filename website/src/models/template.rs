use tenancy::actor::Actor;

#[derive(Clone)]
pub struct TemplateData {
    pub title: String,
    pub actor: Actor,
}

impl TemplateData {
    pub fn new(actor: Actor) -> TemplateData {
        TemplateData {
            title: String::from(""),
            actor,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.actor.is_authenticated()
    }
}

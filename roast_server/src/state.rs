use std::sync::Arc;

use roast_core::{ai::TextGenerator, birdeye::BirdeyeClient};

#[derive(Clone)]
pub struct ServerState {
    birdeye: BirdeyeClient,
    generator: Option<Arc<dyn TextGenerator>>,
}

impl From<(BirdeyeClient, Option<Arc<dyn TextGenerator>>)> for ServerState {
    fn from(states: (BirdeyeClient, Option<Arc<dyn TextGenerator>>)) -> Self {
        let (birdeye, generator) = states;
        Self { birdeye, generator }
    }
}

impl ServerState {
    pub fn birdeye(&self) -> &BirdeyeClient {
        &self.birdeye
    }

    pub fn generator(&self) -> Option<&dyn TextGenerator> {
        self.generator.as_deref()
    }
}

#[derive(Debug, Clone)]
pub struct GreedyConfig {
    pub maximum_iterations: usize,
}

impl Default for GreedyConfig {
    fn default() -> Self {
        Self {
            maximum_iterations: 1000,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DfsGuidedConfig {
    pub maximum_iterations: usize,
}

impl Default for DfsGuidedConfig {
    fn default() -> Self {
        Self {
            maximum_iterations: 100,
        }
    }
}

use std::sync::Arc;
use wfcore::platform::WFPlatform;

use super::*;

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wf_platform(mut self, val: impl WFPlatform + 'static) -> Self {
        self.wf_platform = Some(Arc::new(val));
        self
    }

    pub fn arc_wf_platform(mut self, val: Arc<dyn WFPlatform>) -> Self {
        self.wf_platform = Some(val);
        self
    }

    pub fn build(self) -> Platform {
        Platform(Arc::new(PlatformInner {
            wf_platform: self.wf_platform
                .expect("missing required argument wf_platform"),
        }))
    }
}

impl Platform {
    pub fn wf_platform(&self) -> &dyn WFPlatform {
        self.0.wf_platform.as_ref()
    }
}

mod catalog;
mod transition;
mod workflow;

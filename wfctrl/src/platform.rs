use std::sync::Arc;
use wfcore::platform::WFPlatform;

#[derive(Default)]
pub struct Builder {
    wf_platform: Option<Arc<dyn WFPlatform>>,
}

/// The workflow platform.  Cloning is cheap as clones share the same
/// underlying backend.
#[derive(Clone)]
pub struct Platform(Arc<PlatformInner>);

struct PlatformInner {
    wf_platform: Arc<dyn WFPlatform>,
}

mod impls;

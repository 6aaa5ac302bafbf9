//! Host backend that logs directives instead of driving a game engine.

use anyhow::Result;
use last_stand_host::{HostBackend, HostDirective};

/// Records every executed directive and mirrors it onto the log.
#[derive(Debug, Default)]
pub(crate) struct LoggingHost {
    executed: Vec<HostDirective>,
}

impl LoggingHost {
    /// Directives executed so far, in execution order.
    pub(crate) fn executed(&self) -> &[HostDirective] {
        &self.executed
    }
}

impl HostBackend for LoggingHost {
    fn execute(&mut self, directive: HostDirective) -> Result<()> {
        match &directive {
            HostDirective::Announce(announcement) => {
                log::info!("{} {}", announcement.title, announcement.subtitle);
            }
            HostDirective::Notify(notice) => {
                log::info!("{}", notice.message);
            }
            HostDirective::SpawnReward(request) => {
                log::info!(
                    "reward '{}' spawned at {} via {:?} route",
                    request.spawn_ref.as_str(),
                    request.position,
                    request.route
                );
            }
            HostDirective::ShakeCamera(shake) => {
                log::debug!(
                    "camera impulse {} at {} over {}s",
                    shake.intensity,
                    shake.position,
                    shake.duration
                );
            }
            HostDirective::ReportFailure(failure) => {
                log::error!("{failure}");
            }
        }
        self.executed.push(directive);
        Ok(())
    }
}

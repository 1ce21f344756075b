//! Process enumeration backed by sysinfo.
//!
//! The `System` instance is kept between captures because per-process CPU
//! usage is computed from the delta of two refreshes. A process seen for the
//! first time therefore reports 0.0% CPU.

use sysinfo::{
    ProcessRefreshKind, ProcessStatus, ProcessesToUpdate, System, UpdateKind, Users,
};

use crate::core::process_monitor::{
    EnumerationError, ProcessEnumerator, ProcessReadError, RawProcess,
};

/// Enumerates local processes with sysinfo
pub struct SysinfoEnumerator {
    system: System,
    users: Users,
}

impl SysinfoEnumerator {
    pub fn new() -> Self {
        Self {
            system: System::new(),
            users: Users::new_with_refreshed_list(),
        }
    }

    fn refresh(&mut self) -> usize {
        self.system.refresh_memory();
        self.system.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing()
                .with_cpu()
                .with_memory()
                .with_user(UpdateKind::OnlyIfNotSet),
        )
    }

    fn user_name(&mut self, uid: Option<&sysinfo::Uid>, users_refreshed: &mut bool) -> Option<String> {
        let uid = uid?;
        if let Some(user) = self.users.get_user_by_id(uid) {
            return Some(user.name().to_string());
        }

        // New accounts can appear while we run; reload the list once per capture
        if !*users_refreshed {
            self.users.refresh();
            *users_refreshed = true;
        }
        self.users
            .get_user_by_id(uid)
            .map(|user| user.name().to_string())
    }
}

impl Default for SysinfoEnumerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessEnumerator for SysinfoEnumerator {
    fn enumerate(
        &mut self,
        visit: &mut dyn FnMut(Result<RawProcess, ProcessReadError>),
    ) -> Result<(), EnumerationError> {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return Err(EnumerationError::Unsupported);
        }

        let updated = self.refresh();
        log::trace!("sysinfo refreshed {} processes", updated);

        let total_memory = self.system.total_memory();

        // Read everything up front so user lookups can borrow `self` mutably
        let mut entries = Vec::with_capacity(self.system.processes().len());
        for process in self.system.processes().values() {
            // Linux reports threads as tasks; they are not processes
            if process.thread_kind().is_some() {
                continue;
            }

            let pid = process.pid().as_u32();
            if !process.exists() {
                entries.push(Err(ProcessReadError::Vanished(pid)));
                continue;
            }

            let memory_percent = if total_memory > 0 {
                (process.memory() as f64 / total_memory as f64 * 100.0) as f32
            } else {
                0.0
            };

            let name = process.name().to_string_lossy().to_string();

            entries.push(Ok((
                RawProcess {
                    pid,
                    name: (!name.is_empty()).then_some(name),
                    cpu_percent: Some(process.cpu_usage()),
                    memory_percent: Some(memory_percent),
                    status: Some(status_name(process.status()).to_string()),
                    user: None,
                },
                process.user_id().cloned(),
            )));
        }

        let mut users_refreshed = false;
        for entry in entries {
            match entry {
                Ok((mut raw, uid)) => {
                    raw.user = self.user_name(uid.as_ref(), &mut users_refreshed);
                    visit(Ok(raw));
                }
                Err(e) => visit(Err(e)),
            }
        }

        Ok(())
    }
}

/// Lower-case state name for the status column
pub fn status_name(status: ProcessStatus) -> &'static str {
    match status {
        ProcessStatus::Run => "running",
        ProcessStatus::Sleep => "sleeping",
        ProcessStatus::Idle => "idle",
        ProcessStatus::Zombie => "zombie",
        ProcessStatus::Stop => "stopped",
        ProcessStatus::Tracing => "tracing",
        ProcessStatus::Dead => "dead",
        ProcessStatus::Waking => "waking",
        ProcessStatus::Parked => "parked",
        ProcessStatus::LockBlocked => "locked",
        ProcessStatus::UninterruptibleDiskSleep => "disk-sleep",
        _ => "unknown",
    }
}

//! Structured logging integration for events
//!
//! Converts bridge events into tracing records with structured fields.

use gsoc2_events::{AppEvent, EventMessage, ProcessEvent, ResolveEvent};
use tracing::{debug, error, info, warn};

/// Log an event at the level its metadata carries
pub fn log_event_with_tracing(message: &EventMessage) {
    let meta = &message.meta;
    match &message.event {
        AppEvent::Resolve(resolve) => match resolve {
            ResolveEvent::Resolved { path, source } => {
                debug!(
                    event_id = %meta.event_id,
                    component = meta.source.as_str(),
                    path = %path.display(),
                    source = %source,
                    "Binary resolved"
                );
            }
            ResolveEvent::Failed { os, arch, failure } => {
                error!(
                    event_id = %meta.event_id,
                    component = meta.source.as_str(),
                    os = %os,
                    arch = %arch,
                    code = ?failure.code,
                    message = %failure.message,
                    hint = ?failure.hint,
                    "Binary resolution failed"
                );
            }
        },

        AppEvent::Process(process) => match process {
            ProcessEvent::Started {
                program,
                args,
                mode,
            } => {
                info!(
                    event_id = %meta.event_id,
                    component = meta.source.as_str(),
                    program = %program,
                    args = ?args,
                    mode = %mode,
                    "Process started"
                );
            }
            ProcessEvent::Completed {
                program,
                exit_code,
                duration_ms,
                stdout_bytes,
            } => {
                if *exit_code == Some(0) {
                    info!(
                        event_id = %meta.event_id,
                    component = meta.source.as_str(),
                        program = %program,
                        duration_ms,
                        stdout_bytes = ?stdout_bytes,
                        "Process completed"
                    );
                } else {
                    warn!(
                        event_id = %meta.event_id,
                    component = meta.source.as_str(),
                        program = %program,
                        exit_code = ?exit_code,
                        duration_ms,
                        "Process exited unsuccessfully"
                    );
                }
            }
            ProcessEvent::Failed {
                program,
                failure,
                duration_ms,
            } => {
                error!(
                    event_id = %meta.event_id,
                    component = meta.source.as_str(),
                    program = %program,
                    duration_ms,
                    code = ?failure.code,
                    message = %failure.message,
                    "Process failed"
                );
            }
        },
    }
}

//! Backend worker: one thread owning a tokio runtime and the HTTP roster
//! client, processing UI commands strictly in order.

use std::thread;

use client_core::{RosterClient, StudentService};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(server_url: String, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let client = RosterClient::new(server_url);
            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::LoadStudents => {
                        tracing::info!("backend: load_students");
                        match client.list_students().await {
                            Ok(students) => {
                                let _ = ui_tx.try_send(UiEvent::RosterLoaded(students));
                            }
                            Err(err) => {
                                tracing::error!("backend: load_students failed: {err:#}");
                                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                                    UiErrorContext::LoadRoster,
                                    format!("{err:#}"),
                                )));
                            }
                        }
                    }
                    BackendCommand::SaveStudent {
                        target: None,
                        payload,
                    } => {
                        tracing::info!("backend: create_student");
                        match client.create_student(&payload).await {
                            Ok(student) => {
                                let _ = ui_tx.try_send(UiEvent::StudentCreated(student));
                            }
                            Err(err) => {
                                tracing::error!("backend: create_student failed: {err:#}");
                                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                                    UiErrorContext::SaveStudent,
                                    format!("{err:#}"),
                                )));
                            }
                        }
                    }
                    BackendCommand::SaveStudent {
                        target: Some(student_id),
                        payload,
                    } => {
                        tracing::info!(student_id = student_id.0, "backend: update_student");
                        match client.update_student(student_id, &payload).await {
                            Ok(student) => {
                                let _ = ui_tx.try_send(UiEvent::StudentUpdated(student));
                            }
                            Err(err) => {
                                tracing::error!(
                                    student_id = student_id.0,
                                    "backend: update_student failed: {err:#}"
                                );
                                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                                    UiErrorContext::SaveStudent,
                                    format!("{err:#}"),
                                )));
                            }
                        }
                    }
                    BackendCommand::DeleteStudent { student_id } => {
                        tracing::info!(student_id = student_id.0, "backend: delete_student");
                        match client.delete_student(student_id).await {
                            Ok(()) => {
                                let _ = ui_tx.try_send(UiEvent::StudentDeleted(student_id));
                            }
                            Err(err) => {
                                tracing::error!(
                                    student_id = student_id.0,
                                    "backend: delete_student failed: {err:#}"
                                );
                                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                                    UiErrorContext::DeleteStudent,
                                    format!("{err:#}"),
                                )));
                            }
                        }
                    }
                }
            }
        });
    });
}

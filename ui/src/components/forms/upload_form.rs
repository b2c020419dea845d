use dioxus::prelude::*;

use crate::app::use_auth;
use crate::console_info;
use crate::features::upload::{submit_upload, UploadAction, UploadFile, UploadFormState};

/// Content type from the picked file's extension; the browser file engine
/// only hands us names and bytes
fn content_type_for(name: &str) -> &'static str {
    match name.rsplit_once('.').map(|(_, ext)| ext.to_lowercase()) {
        Some(ext) if ext == "mp4" => "video/mp4",
        Some(ext) if ext == "webm" => "video/webm",
        Some(ext) if ext == "mov" => "video/quicktime",
        Some(ext) if ext == "png" => "image/png",
        Some(ext) if ext == "jpg" || ext == "jpeg" => "image/jpeg",
        Some(ext) if ext == "gif" => "image/gif",
        Some(ext) if ext == "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

async fn read_picked_file(event: Event<FormData>) -> Option<UploadFile> {
    let engine = event.files()?;
    let name = engine.files().into_iter().next()?;
    let bytes = engine.read_file(&name).await?;
    Some(UploadFile {
        content_type: content_type_for(&name).to_string(),
        name,
        bytes,
    })
}

#[derive(Props, PartialEq, Clone)]
pub struct UploadFormProps {
    pub on_success: EventHandler<()>,
}

#[component]
pub fn UploadForm(props: UploadFormProps) -> Element {
    let mut state = use_signal(UploadFormState::default);
    let auth = use_auth();

    let dispatch = EventHandler::new(move |action: UploadAction| {
        state.with_mut(|s| s.reduce_in_place(action));
    });

    rsx! {
        div {
            class: "upload-form",

            h2 {
                class: "form-title",
                "Upload a video"
            }

            if let Some(error) = state().error {
                p {
                    class: "form-error",
                    "{error}"
                }
            }

            div {
                class: "input-section",
                input {
                    class: "input-field",
                    r#type: "text",
                    placeholder: "Title",
                    value: "{state().title}",
                    disabled: state().is_uploading,
                    oninput: move |event| dispatch.call(UploadAction::SetTitle(event.value()))
                }
            }

            div {
                class: "input-section",
                textarea {
                    class: "input-field",
                    placeholder: "Description",
                    value: "{state().description}",
                    disabled: state().is_uploading,
                    oninput: move |event| dispatch.call(UploadAction::SetDescription(event.value()))
                }
            }

            div {
                class: "input-section",
                label {
                    class: "input-label",
                    "Video:"
                }
                input {
                    r#type: "file",
                    accept: "video/*",
                    disabled: state().is_uploading,
                    onchange: move |event| async move {
                        dispatch.call(UploadAction::SetVideo(read_picked_file(event).await));
                    }
                }
            }

            div {
                class: "input-section",
                label {
                    class: "input-label",
                    "Thumbnail:"
                }
                input {
                    r#type: "file",
                    accept: "image/*",
                    disabled: state().is_uploading,
                    onchange: move |event| async move {
                        dispatch.call(UploadAction::SetThumbnail(read_picked_file(event).await));
                    }
                }
            }

            div {
                class: "button-section",
                button {
                    class: "upload-button",
                    disabled: state().is_uploading,
                    onclick: move |_| {
                        let current = state();
                        if !current.is_complete() {
                            dispatch.call(UploadAction::SetError(Some(
                                "Please fill in all fields".to_string(),
                            )));
                            return;
                        }
                        dispatch.call(UploadAction::SetUploading(true));
                        dispatch.call(UploadAction::SetError(None));

                        let backend = auth.backend();
                        let on_success = props.on_success;
                        spawn(async move {
                            match submit_upload(backend.as_ref(), &current).await {
                                Ok(()) => {
                                    console_info!("[Upload] Video uploaded, navigating home");
                                    on_success.call(());
                                }
                                Err(e) => {
                                    dispatch.call(UploadAction::SetError(Some(e.to_string())));
                                }
                            }
                            dispatch.call(UploadAction::SetUploading(false));
                        });
                    },
                    if state().is_uploading {
                        "Uploading..."
                    } else {
                        "Upload"
                    }
                }
            }
        }
    }
}

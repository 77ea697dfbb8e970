/// Options page: one checkbox per hideable region

use yew::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use patternfly_yew::prelude::*;
use crate::descriptor::option_names;
use crate::preferences::{PreferenceError, Preferences};
use crate::settings::{FormAction, SettingsForm};
use crate::ui::components::OptionToggle;

// Import JS bridge functions
#[wasm_bindgen(module = "/options.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getSyncStorage(keys: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setSyncStorage(values: JsValue) -> Result<(), JsValue>;
}

#[derive(Clone, PartialEq)]
enum OptionsState {
    Loading,
    Ready,
    Error(String),
}

#[function_component(OptionsPage)]
pub fn options_page() -> Html {
    let state = use_state(|| OptionsState::Loading);
    let form = use_reducer(SettingsForm::new);

    // Restore stored values on mount
    {
        let state = state.clone();
        let form = form.clone();

        use_effect_with((), move |_| {
            spawn_local(async move {
                match load_stored().await {
                    Ok(stored) => {
                        log::debug!("Restoring options: {}", stored.to_json());
                        form.dispatch(FormAction::Restore(stored));
                        state.set(OptionsState::Ready);
                    }
                    Err(e) => {
                        log::error!("Error: {}", e);
                        state.set(OptionsState::Error(e.to_string()));
                    }
                }
            });
            || ()
        });
    }

    // Persist only the option that changed
    let on_toggle = {
        let state = state.clone();
        let form = form.clone();

        Callback::from(move |(option, checked): (&'static str, bool)| {
            let write = match (*form).clone().change(option, checked) {
                Ok(write) => write,
                Err(e) => {
                    log::warn!("{}", e);
                    return;
                }
            };
            form.dispatch(FormAction::Set(option, checked));

            let state = state.clone();
            let form = form.clone();
            spawn_local(async move {
                let (next_state, revert) = save_outcome(option, checked, save(&write).await);
                if let Some(action) = revert {
                    form.dispatch(action);
                }
                state.set(next_state);
            });
        })
    };

    let is_loading = matches!(*state, OptionsState::Loading);

    html! {
        <div class="padding-20">
            <h1 class="options-title">{"Clear YouTube interface"}</h1>

            {match &*state {
                OptionsState::Loading => html! {
                    <div class="loading-text-center">
                        <Spinner />
                    </div>
                },
                OptionsState::Error(err) => html! {
                    <Alert r#type={AlertType::Danger} title={"Storage error"} inline={true}>
                        {err.clone()}
                    </Alert>
                },
                OptionsState::Ready => html! {},
            }}

            <form class="options-form">
                {for form.entries().map(|(descriptor, checked)| html! {
                    <OptionToggle
                        key={descriptor.option_name}
                        option={descriptor.option_name}
                        label={descriptor.id.label()}
                        checked={checked}
                        disabled={is_loading}
                        ontoggle={on_toggle.clone()}
                    />
                })}
            </form>
        </div>
    }
}

async fn load_stored() -> Result<Preferences, PreferenceError> {
    let keys_js = serde_wasm_bindgen::to_value(&option_names())
        .map_err(|e| PreferenceError::Load(format!("{:?}", e)))?;

    let stored_js = getSyncStorage(keys_js)
        .await
        .map_err(|e| PreferenceError::Load(format!("{:?}", e)))?;

    let stored: serde_json::Value = serde_wasm_bindgen::from_value(stored_js)
        .map_err(|e| PreferenceError::Parse(format!("{:?}", e)))?;

    Preferences::from_value(&stored)
}

async fn save(write: &Preferences) -> Result<(), PreferenceError> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    let values_js = serde::Serialize::serialize(write, &serializer)
        .map_err(|e| PreferenceError::Save(format!("{:?}", e)))?;

    setSyncStorage(values_js)
        .await
        .map_err(|e| PreferenceError::Save(format!("{:?}", e)))
}

/// Page state after a save; a failed write unticks the checkbox again
fn save_outcome(
    option: &'static str,
    checked: bool,
    result: Result<(), PreferenceError>,
) -> (OptionsState, Option<FormAction>) {
    match result {
        Ok(()) => (OptionsState::Ready, None),
        Err(e) => {
            log::error!("Error: {}", e);
            (OptionsState::Error(e.to_string()), Some(FormAction::Set(option, !checked)))
        }
    }
}

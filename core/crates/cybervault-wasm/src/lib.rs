use wasm_bindgen::prelude::*;
use cybervault_core::generator::generate_password_of_length;
use cybervault_core::{
    validate as validate_draft, Clipboard, CopyField, EntryDraft, EntryForm, EntryId, EntryPatch,
    Field, Intent, KeyValueStore, ListView, Outcome, SaveStatus, Vault, VaultConfig, VaultError,
};
use chrono::Utc;
use serde::Serialize;

/// `window.localStorage` as a key-value store.
pub struct LocalStorage {
    inner: web_sys::Storage,
}

impl LocalStorage {
    pub fn from_window() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
        let inner = window
            .local_storage()?
            .ok_or_else(|| JsValue::from_str("localStorage unavailable"))?;
        Ok(Self { inner })
    }
}

impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> cybervault_core::Result<Option<String>> {
        self.inner.get_item(key).map_err(storage_error)
    }

    fn set_item(&mut self, key: &str, value: &str) -> cybervault_core::Result<()> {
        self.inner.set_item(key, value).map_err(storage_error)
    }

    fn remove_item(&mut self, key: &str) -> cybervault_core::Result<()> {
        self.inner.remove_item(key).map_err(storage_error)
    }
}

fn storage_error(e: JsValue) -> VaultError {
    VaultError::Storage(e.as_string().unwrap_or_else(|| format!("{:?}", e)))
}

/// Hands copied text to a JS callback, typically wrapping `navigator.clipboard.writeText`.
struct JsClipboard<'a>(&'a js_sys::Function);

impl Clipboard for JsClipboard<'_> {
    fn copy_text(&mut self, text: &str) {
        // Fire-and-forget; a failing callback only loses the copy.
        let _ = self.0.call1(&JsValue::NULL, &JsValue::from_str(text));
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Validation failures cross as a `{field: message}` object, everything else as a string.
fn to_js_error(e: VaultError) -> JsValue {
    match &e {
        VaultError::Validation(errors) => to_js(errors).unwrap_or_else(|err| err),
        _ => JsValue::from_str(&e.to_string()),
    }
}

fn entry_id(id: f64) -> Result<EntryId, JsValue> {
    if id.is_finite() && id >= 0.0 && id.fract() == 0.0 {
        Ok(EntryId(id as u64))
    } else {
        Err(JsValue::from_str("Invalid ID"))
    }
}

fn parse_field(name: &str) -> Result<Field, JsValue> {
    name.parse::<Field>().map_err(|e| JsValue::from_str(&e))
}

#[wasm_bindgen]
pub fn init_logging() {
    // Repeat calls keep the first subscriber.
    let _ = tracing_wasm::try_set_as_global_default();
}

#[wasm_bindgen]
pub fn generate_password() -> String {
    cybervault_core::generate_password()
}

/// Field errors for a `{website, username, password, notes}` object; empty object when valid.
#[wasm_bindgen]
pub fn validate(draft: JsValue) -> Result<JsValue, JsValue> {
    let draft: EntryDraft = serde_wasm_bindgen::from_value(draft)?;
    to_js(&validate_draft(&draft))
}

#[wasm_bindgen]
pub struct WasmEntryForm {
    inner: EntryForm,
}

#[wasm_bindgen]
impl WasmEntryForm {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmEntryForm {
        WasmEntryForm {
            inner: EntryForm::new(),
        }
    }

    pub fn set_field(&mut self, field: &str, value: String) -> Result<(), JsValue> {
        self.inner.set_field(parse_field(field)?, value);
        Ok(())
    }

    pub fn generate_password(&mut self) {
        self.inner.generate_password();
    }

    pub fn toggle_password_visibility(&mut self) {
        self.inner.toggle_password_visibility();
    }

    #[wasm_bindgen(getter)]
    pub fn password_visible(&self) -> bool {
        self.inner.password_visible()
    }

    #[wasm_bindgen(getter)]
    pub fn is_editing(&self) -> bool {
        self.inner.is_editing()
    }

    pub fn values(&self) -> Result<JsValue, JsValue> {
        to_js(self.inner.values())
    }

    pub fn errors(&self) -> Result<JsValue, JsValue> {
        to_js(self.inner.errors())
    }
}

impl Default for WasmEntryForm {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
pub struct WasmVault {
    inner: Vault<LocalStorage>,
    list: ListView,
    status: SaveStatus,
    config: VaultConfig,
}

#[wasm_bindgen]
impl WasmVault {
    /// Opens the vault stored in `localStorage`. `config` may be omitted or partial.
    #[wasm_bindgen(constructor)]
    pub fn open(config: JsValue) -> Result<WasmVault, JsValue> {
        let config: VaultConfig = if config.is_undefined() || config.is_null() {
            VaultConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };

        let store = LocalStorage::from_window()?;
        Ok(WasmVault {
            inner: Vault::open(store, &config),
            list: ListView::new(config.copy_flash()),
            status: SaveStatus::new(config.save_flash()),
            config,
        })
    }

    pub fn entries(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.entries())
    }

    /// Entries as list rows: masked passwords and copy confirmations applied.
    pub fn rows(&mut self) -> Result<JsValue, JsValue> {
        let now = Utc::now();
        self.list.tick(now);
        to_js(&self.list.rows(self.inner.entries(), now))
    }

    #[wasm_bindgen(getter)]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn add(
        &mut self,
        website: String,
        username: String,
        password: String,
        notes: Option<String>,
    ) -> Result<f64, JsValue> {
        let draft = EntryDraft {
            website,
            username,
            password,
            notes: notes.unwrap_or_default(),
        };
        let id = self.inner.add(draft).map_err(to_js_error)?;
        self.status.mark_saved(Utc::now());
        Ok(id.0 as f64)
    }

    /// Starts editing and returns a form prefilled with the entry, or
    /// `undefined` if the entry no longer exists.
    pub fn begin_edit(&mut self, id: f64) -> Result<Option<WasmEntryForm>, JsValue> {
        let id = entry_id(id)?;
        Ok(self.inner.begin_edit(id).map(|initial| WasmEntryForm {
            inner: EntryForm::editing(id, initial)
                .with_password_length(self.config.generated_password_length),
        }))
    }

    /// Applies a partial `{website?, username?, password?, notes?}` to the entry being edited.
    pub fn save_edit(&mut self, patch: JsValue) -> Result<Option<f64>, JsValue> {
        let patch: EntryPatch = serde_wasm_bindgen::from_value(patch)?;
        let outcome = self
            .inner
            .dispatch(Intent::SaveEdit(patch))
            .map_err(to_js_error)?;
        self.settle(&outcome);
        Ok(match outcome {
            Outcome::Updated(id) => Some(id.0 as f64),
            _ => None,
        })
    }

    pub fn cancel_edit(&mut self) {
        self.inner.cancel_edit();
    }

    pub fn delete(&mut self, id: f64) -> Result<bool, JsValue> {
        let outcome = self
            .inner
            .dispatch(Intent::Delete(entry_id(id)?))
            .map_err(to_js_error)?;
        self.settle(&outcome);
        Ok(outcome.persisted())
    }

    /// A blank new-entry form using the configured generator length.
    pub fn new_form(&self) -> WasmEntryForm {
        WasmEntryForm {
            inner: EntryForm::new().with_password_length(self.config.generated_password_length),
        }
    }

    /// Validates and submits a form. Returns `false` when the form holds
    /// field errors. The inputs are left as typed unless the vault accepts
    /// the submission.
    pub fn submit(&mut self, form: &mut WasmEntryForm) -> Result<bool, JsValue> {
        let Some(submission) = form.inner.prepare() else {
            return Ok(false);
        };
        let outcome = self.inner.dispatch(submission.into()).map_err(to_js_error)?;
        form.inner.complete();
        self.settle(&outcome);
        Ok(true)
    }

    pub fn cancel(&mut self, form: &mut WasmEntryForm) {
        if let Some(intent) = form.inner.cancel() {
            // Cancelling never fails or persists.
            let _ = self.inner.dispatch(intent);
        }
    }

    #[wasm_bindgen(getter)]
    pub fn editing_id(&self) -> Option<f64> {
        self.inner.editing().map(|e| e.id.0 as f64)
    }

    /// `"Saved"` while the indicator is live.
    pub fn save_status(&mut self) -> Option<String> {
        let now = Utc::now();
        self.status.tick(now);
        self.status.current(now).map(str::to_string)
    }

    pub fn toggle_reveal(&mut self, id: f64) -> Result<(), JsValue> {
        self.list.toggle_reveal(entry_id(id)?);
        Ok(())
    }

    /// Copies `"username"` or `"password"` of an entry through `clipboard(text)`.
    pub fn copy(&mut self, id: f64, field: &str, clipboard: &js_sys::Function) -> Result<bool, JsValue> {
        let field = match field {
            "username" => CopyField::Username,
            "password" => CopyField::Password,
            other => return Err(JsValue::from_str(&format!("Cannot copy field: {}", other))),
        };
        let Some(entry) = self.inner.get(entry_id(id)?) else {
            return Ok(false);
        };
        self.list
            .copy(entry, field, &mut JsClipboard(clipboard), Utc::now());
        Ok(true)
    }

    pub fn generate_password(&self) -> String {
        generate_password_of_length(self.config.generated_password_length)
    }
}

impl WasmVault {
    fn settle(&mut self, outcome: &Outcome) {
        if outcome.persisted() {
            self.status.mark_saved(Utc::now());
        }
        if let Outcome::Deleted(id) = outcome {
            self.list.forget(*id);
        }
    }
}

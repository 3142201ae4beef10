// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2026 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! The telemetry bootstrap.

use std::{
    cell::{OnceCell, RefCell},
    rc::Rc,
};

use indexmap::IndexMap;
use serde_json::Value;
use tec_core::{paths::plugin_slug_from_file, string::escape_html};
use ustr::Ustr;

use super::{
    config::TelemetryConfig,
    host::{PluginHost, SettingsForm, TelemetryLibrary},
    options::{OptionStore, is_truthy_option},
    status::{OptInStatus, OptInSubscriber},
};
use crate::hooks::HookRegistry;

/// Arguments of the opt-in modal, keyed by name in insertion order.
pub type OptinArgs = IndexMap<String, Value>;

pub const PERMISSIONS_URL_FILTER: &str = "tec_common_telemetry_permissions_url";
pub const TERMS_URL_FILTER: &str = "tec_common_telemetry_terms_url";
pub const PRIVACY_URL_FILTER: &str = "tec_common_telemetry_privacy_url";
pub const OPTIN_ARGS_FILTER: &str = "tec_common_telemetry_optin_args";
pub const DO_OPTIN_MODAL_FILTER: &str = "tec_common_telemetry_do_optin_modal";
pub const OPTIN_TAB_FILTER: &str = "tec_common_telemetry_optin_tab";

/// The legacy option marking a site as already opted in.
pub const LEGACY_OPTIN_OPTION: &str = "fs_accounts";

/// Settings form field holding the submitted tab.
pub const SETTINGS_TAB_FIELD: &str = "current-settings-tab";

/// Settings form field holding the submitted opt-in status.
pub const OPTIN_STATUS_FIELD: &str = "opt-in-status";

/// The settings tab carrying the opt-in control unless filtered.
pub const DEFAULT_OPTIN_TAB: &str = "general";

/// Fired once the host finished loading its admin screens.
pub const ADMIN_INIT_ACTION: &str = "admin_init";

/// Fired when the host saves the opt-in status settings field.
pub const SAVE_OPTIN_FIELD_ACTION: &str = "tribe_settings_save_field_opt-in-status";

/// Runs after the telemetry library initialized the status option during `admin_init`.
pub const MIGRATION_PRIORITY: i32 = 100;

const PLUGIN_LOGO_PATH: &str = "images/logo/tec-brand.svg";
const PLUGIN_NAME: &str = "TEC Common";

/// The collaborators of [`Telemetry`].
#[derive(Clone, Debug)]
pub struct TelemetryContainer {
    pub hooks: Rc<HookRegistry>,
    pub host: Rc<dyn PluginHost>,
    pub library: Rc<dyn TelemetryLibrary>,
    pub options: Rc<dyn OptionStore>,
}

/// Configures the telemetry library and mediates the opt-in state of this plugin.
#[derive(Debug)]
pub struct Telemetry {
    config: TelemetryConfig,
    container: TelemetryContainer,
    parent_plugin: OnceCell<String>,
    optin_args: RefCell<OptinArgs>,
}

impl Telemetry {
    /// Creates a new [`Telemetry`] instance.
    #[must_use]
    pub fn new(config: TelemetryConfig, container: TelemetryContainer) -> Self {
        Self {
            config,
            container,
            parent_plugin: OnceCell::new(),
            optin_args: RefCell::new(OptinArgs::new()),
        }
    }

    /// Returns the library configuration.
    #[must_use]
    pub const fn config(&self) -> &TelemetryConfig {
        &self.config
    }

    /// Configures and starts the telemetry library for the parent plugin.
    ///
    /// # Errors
    ///
    /// Returns an error if the library rejects the configuration or fails to start.
    pub fn init(&self) -> anyhow::Result<()> {
        let library = &self.container.library;
        library.configure(&self.config)?;

        let plugin_file = self.container.host.parent_plugin_file();
        library.init(&plugin_file)?;

        log::info!(
            "Initialized telemetry for '{}' ({})",
            self.slug(),
            plugin_file.display()
        );
        Ok(())
    }

    /// Returns the slug of the parent plugin, derived once from its main file name.
    pub fn parent_plugin_slug(&self) -> &str {
        self.parent_plugin
            .get_or_init(|| plugin_slug_from_file(self.container.host.parent_plugin_file()))
    }

    /// Returns the plugin slug.
    #[must_use]
    pub fn slug(&self) -> &str {
        &self.config.stellar_slug
    }

    /// Returns the hook prefix.
    #[must_use]
    pub fn hook_prefix(&self) -> &str {
        &self.config.hook_prefix
    }

    /// Returns the filter through which the library reads the opt-in modal arguments.
    #[must_use]
    pub fn optin_arg_hook(&self) -> String {
        format!("stellarwp/telemetry/{}/optin_args", self.slug())
    }

    /// Returns the action which shows the opt-in modal.
    #[must_use]
    pub fn optin_action(&self) -> String {
        format!("stellarwp/telemetry/{}/optin", self.slug())
    }

    /// Returns the filter applied to the stored opt-in status.
    #[must_use]
    pub fn optin_status_filter(&self) -> String {
        format!("tec_common_telemetry_{}_optin_status", self.hook_prefix())
    }

    fn filtered_url(&self, hook: &str) -> String {
        self.container.hooks.apply_filters(hook, "#".to_string(), &())
    }

    pub fn permissions_url(&self) -> String {
        self.filtered_url(PERMISSIONS_URL_FILTER)
    }

    pub fn terms_url(&self) -> String {
        self.filtered_url(TERMS_URL_FILTER)
    }

    pub fn privacy_url(&self) -> String {
        self.filtered_url(PRIVACY_URL_FILTER)
    }

    /// Returns the opt-in arguments assembled by the latest [`Self::filter_optin_args`].
    #[must_use]
    pub fn optin_args(&self) -> OptinArgs {
        self.optin_args.borrow().clone()
    }

    /// Merges this plugin's opt-in modal arguments over `args`.
    ///
    /// Keys present in both take the plugin's value, keeping the position they had in `args`.
    pub fn filter_optin_args(&self, args: OptinArgs) -> OptinArgs {
        let host = &self.container.host;
        let user_name = escape_html(&host.current_user_display_name());

        let mut defaults = OptinArgs::new();
        defaults.insert(
            "plugin_logo".into(),
            host.resource_url(PLUGIN_LOGO_PATH).into(),
        );
        defaults.insert("plugin_logo_width".into(), "auto".into());
        defaults.insert("plugin_logo_height".into(), 42.into());
        defaults.insert("plugin_logo_alt".into(), format!("{PLUGIN_NAME} Logo").into());
        defaults.insert("plugin_name".into(), PLUGIN_NAME.into());
        defaults.insert("plugin_slug".into(), self.slug().into());
        defaults.insert("user_name".into(), user_name.clone().into());
        defaults.insert("permissions_url".into(), self.permissions_url().into());
        defaults.insert("tos_url".into(), self.terms_url().into());
        defaults.insert("privacy_url".into(), self.privacy_url().into());
        defaults.insert(
            "opted_in_plugins_text".into(),
            "See which plugins you have opted in to tracking for".into(),
        );
        defaults.insert(
            "heading".into(),
            format!("We hope you love {PLUGIN_NAME}!").into(),
        );
        defaults.insert(
            "intro".into(),
            format!(
                "Hi, {user_name}! This is an invitation to help our StellarWP community. \
                 If you opt-in, some data about your usage of {PLUGIN_NAME} and future StellarWP \
                 Products will be shared with our teams (so they can work their butts off to \
                 improve). We will also share some helpful info on WordPress, and our products \
                 from time to time. And if you skip this, that’s okay! Our products still work \
                 just fine."
            )
            .into(),
        );

        let filtered = self
            .container
            .hooks
            .apply_filters(OPTIN_ARGS_FILTER, defaults, &());
        *self.optin_args.borrow_mut() = filtered.clone();

        let mut merged = args;
        merged.extend(filtered);
        merged
    }

    /// Shows the opt-in modal unless a filter vetoes it, returning whether it was shown.
    pub fn do_optin_modal(&self) -> bool {
        let slug = Ustr::from(self.slug());
        let hooks = &self.container.hooks;

        if !hooks.apply_filters(DO_OPTIN_MODAL_FILTER, true, &slug) {
            log::debug!("Opt-in modal for '{slug}' vetoed");
            return false;
        }

        hooks.do_action(&self.optin_action(), &());
        true
    }

    /// Returns the settings tab carrying the opt-in control.
    pub fn optin_tab(&self) -> String {
        let hooks = &self.container.hooks;
        let tab = hooks.apply_filters(OPTIN_TAB_FILTER, DEFAULT_OPTIN_TAB.to_string(), &());
        let parent_filter = format!("tec_common_telemetry_{}_optin_tab", self.parent_plugin_slug());
        hooks.apply_filters(&parent_filter, tab, &())
    }

    /// Persists the opt-in status submitted with the settings tab carrying the control.
    ///
    /// Forms without a tab, or submitted from another tab, are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the status cannot be persisted.
    pub fn save_opt_in_setting_field(&self, form: &SettingsForm) -> anyhow::Result<()> {
        let Some(submitted_tab) = form.get(SETTINGS_TAB_FIELD) else {
            log::debug!("No settings tab submitted, skipping opt-in status");
            return Ok(());
        };

        let optin_tab = self.optin_tab();
        if submitted_tab != optin_tab {
            log::debug!("Settings tab '{submitted_tab}' does not carry the opt-in control");
            return Ok(());
        }

        self.status_object()
            .set_status(form.get_bool(OPTIN_STATUS_FIELD))
    }

    /// Returns the opt-in status of this plugin.
    #[must_use]
    pub fn status_object(&self) -> OptInStatus {
        OptInStatus::new(self.container.options.clone(), self.slug())
    }

    /// Returns the subscriber opting this plugin in.
    #[must_use]
    pub fn opt_in_subscriber(&self) -> OptInSubscriber {
        OptInSubscriber::new(self.status_object())
    }

    /// Opts the plugin in when the site had opted in through the legacy integration.
    ///
    /// # Errors
    ///
    /// Returns an error if the status cannot be persisted.
    pub fn migrate_existing_opt_in(&self) -> anyhow::Result<()> {
        let opted_in_already = self
            .container
            .options
            .get_option(LEGACY_OPTIN_OPTION)
            .is_some_and(|v| is_truthy_option(&v));

        if !opted_in_already {
            return Ok(());
        }

        log::debug!("Migrating legacy opt-in of '{}'", self.slug());
        self.opt_in_subscriber().opt_in()
    }

    /// Returns whether this plugin is opted in, `false` when no status was ever stored.
    pub fn plugin_status(&self) -> bool {
        let Some(status) = self.status_object().get_option().optin(self.slug()) else {
            return false;
        };

        self.container
            .hooks
            .apply_filters(&self.optin_status_filter(), status, &())
    }

    /// Wires the opt-in arguments filter, the legacy migration and the settings save onto
    /// the hook registry.
    ///
    /// The registered handlers hold weak references, they become no-ops once `self` drops.
    pub fn register_hooks(self: &Rc<Self>) {
        let hooks = &self.container.hooks;

        let weak = Rc::downgrade(self);
        hooks.add_filter(
            &self.optin_arg_hook(),
            None,
            move |args: &mut OptinArgs, _: &()| {
                if let Some(telemetry) = weak.upgrade() {
                    *args = telemetry.filter_optin_args(std::mem::take(args));
                }
            },
        );

        let weak = Rc::downgrade(self);
        hooks.add_action(ADMIN_INIT_ACTION, Some(MIGRATION_PRIORITY), move |_: &()| {
            if let Some(telemetry) = weak.upgrade()
                && let Err(e) = telemetry.migrate_existing_opt_in()
            {
                log::error!("Failed to migrate existing opt-in: {e}");
            }
        });

        let weak = Rc::downgrade(self);
        hooks.add_action(SAVE_OPTIN_FIELD_ACTION, None, move |form: &SettingsForm| {
            if let Some(telemetry) = weak.upgrade()
                && let Err(e) = telemetry.save_opt_in_setting_field(form)
            {
                log::error!("Failed to save opt-in status: {e}");
            }
        });

        log::debug!("Registered telemetry hooks for '{}'", self.slug());
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::telemetry::{
        status::TELEMETRY_OPTION,
        stubs::{TelemetryFixture, telemetry_fixture},
    };

    #[rstest]
    fn test_init_configures_then_starts_library(telemetry_fixture: TelemetryFixture) {
        telemetry_fixture.telemetry.init().unwrap();

        let library = &telemetry_fixture.library;
        assert_eq!(library.configured(), Some(TelemetryConfig::default()));
        assert_eq!(
            library.initialized_with(),
            Some(PathBuf::from(
                "/var/www/wp-content/plugins/the-events-calendar/the-events-calendar.php"
            ))
        );
    }

    #[rstest]
    fn test_init_propagates_library_error(telemetry_fixture: TelemetryFixture) {
        telemetry_fixture.library.fail_init(true);
        let err = telemetry_fixture.telemetry.init().unwrap_err();
        assert!(err.to_string().contains("refused"));
    }

    #[rstest]
    fn test_parent_plugin_slug_is_derived_once(telemetry_fixture: TelemetryFixture) {
        let telemetry = &telemetry_fixture.telemetry;
        assert_eq!(telemetry.parent_plugin_slug(), "the-events-calendar");

        telemetry_fixture
            .host
            .set_plugin_file("/plugins/event-tickets/event-tickets.php");
        assert_eq!(telemetry.parent_plugin_slug(), "the-events-calendar");
    }

    #[rstest]
    fn test_slug_and_hook_names(telemetry_fixture: TelemetryFixture) {
        let telemetry = &telemetry_fixture.telemetry;
        assert_eq!(telemetry.slug(), "tec-common");
        assert_eq!(
            telemetry.optin_arg_hook(),
            "stellarwp/telemetry/tec-common/optin_args"
        );
        assert_eq!(
            telemetry.optin_status_filter(),
            "tec_common_telemetry_tec_optin_status"
        );
    }

    #[rstest]
    fn test_urls_default_to_hash_and_are_filterable(telemetry_fixture: TelemetryFixture) {
        let telemetry = &telemetry_fixture.telemetry;
        assert_eq!(telemetry.permissions_url(), "#");
        assert_eq!(telemetry.terms_url(), "#");
        assert_eq!(telemetry.privacy_url(), "#");

        telemetry_fixture
            .hooks
            .add_filter(TERMS_URL_FILTER, None, |url: &mut String, _: &()| {
                *url = "https://theeventscalendar.com/terms".to_string();
            });
        assert_eq!(telemetry.terms_url(), "https://theeventscalendar.com/terms");
        assert_eq!(telemetry.privacy_url(), "#");
    }

    #[rstest]
    fn test_filter_optin_args_defaults(telemetry_fixture: TelemetryFixture) {
        let args = telemetry_fixture.telemetry.filter_optin_args(OptinArgs::new());

        assert_eq!(
            args["plugin_logo"],
            json!("https://example.com/common/images/logo/tec-brand.svg")
        );
        assert_eq!(args["plugin_logo_width"], json!("auto"));
        assert_eq!(args["plugin_logo_height"], json!(42));
        assert_eq!(args["plugin_logo_alt"], json!("TEC Common Logo"));
        assert_eq!(args["plugin_name"], json!("TEC Common"));
        assert_eq!(args["plugin_slug"], json!("tec-common"));
        assert_eq!(args["user_name"], json!("Ada &amp; Co"));
        assert_eq!(args["permissions_url"], json!("#"));
        assert_eq!(args["tos_url"], json!("#"));
        assert_eq!(args["privacy_url"], json!("#"));
        assert_eq!(args["heading"], json!("We hope you love TEC Common!"));
        assert!(
            args["intro"]
                .as_str()
                .unwrap()
                .starts_with("Hi, Ada &amp; Co! This is an invitation")
        );
        assert_eq!(args.len(), 13);
    }

    #[rstest]
    fn test_filter_optin_args_merge_order(telemetry_fixture: TelemetryFixture) {
        let mut args = OptinArgs::new();
        args.insert("plugin_name".into(), json!("Caller"));
        args.insert("caller_only".into(), json!(true));

        let merged = telemetry_fixture.telemetry.filter_optin_args(args);

        let keys: Vec<&str> = merged.keys().map(String::as_str).take(3).collect();
        assert_eq!(keys, ["plugin_name", "caller_only", "plugin_logo"]);
        assert_eq!(merged["plugin_name"], json!("TEC Common"));
        assert_eq!(merged["caller_only"], json!(true));
    }

    #[rstest]
    fn test_filter_optin_args_is_filtered_and_remembered(telemetry_fixture: TelemetryFixture) {
        telemetry_fixture.hooks.add_filter(
            OPTIN_ARGS_FILTER,
            None,
            |args: &mut OptinArgs, _: &()| {
                args.insert("plugin_name".into(), json!("The Events Calendar"));
            },
        );

        let merged = telemetry_fixture.telemetry.filter_optin_args(OptinArgs::new());

        assert_eq!(merged["plugin_name"], json!("The Events Calendar"));
        assert_eq!(telemetry_fixture.telemetry.optin_args(), merged);
    }

    #[rstest]
    fn test_do_optin_modal_fires_action(telemetry_fixture: TelemetryFixture) {
        let telemetry = &telemetry_fixture.telemetry;
        assert!(telemetry.do_optin_modal());
        assert_eq!(
            telemetry_fixture
                .hooks
                .did_action("stellarwp/telemetry/tec-common/optin"),
            1
        );
    }

    #[rstest]
    fn test_do_optin_modal_vetoed_by_slug(telemetry_fixture: TelemetryFixture) {
        telemetry_fixture.hooks.add_filter(
            DO_OPTIN_MODAL_FILTER,
            None,
            |go: &mut bool, slug: &Ustr| {
                *go = slug.as_str() != "tec-common";
            },
        );

        assert!(!telemetry_fixture.telemetry.do_optin_modal());
        assert_eq!(
            telemetry_fixture
                .hooks
                .did_action("stellarwp/telemetry/tec-common/optin"),
            0
        );
    }

    #[rstest]
    #[case(SettingsForm::new().with_field(OPTIN_STATUS_FIELD, "1"))]
    #[case(SettingsForm::new()
        .with_field(SETTINGS_TAB_FIELD, "display")
        .with_field(OPTIN_STATUS_FIELD, "1"))]
    fn test_save_opt_in_setting_field_ignored(
        telemetry_fixture: TelemetryFixture,
        #[case] form: SettingsForm,
    ) {
        telemetry_fixture
            .telemetry
            .save_opt_in_setting_field(&form)
            .unwrap();
        assert_eq!(telemetry_fixture.options.get_option(TELEMETRY_OPTION), None);
    }

    #[rstest]
    #[case("1", true)]
    #[case("on", true)]
    #[case("0", false)]
    #[case("maybe", false)]
    fn test_save_opt_in_setting_field_on_general_tab(
        telemetry_fixture: TelemetryFixture,
        #[case] submitted: &str,
        #[case] expected: bool,
    ) {
        let form = SettingsForm::new()
            .with_field(SETTINGS_TAB_FIELD, "general")
            .with_field(OPTIN_STATUS_FIELD, submitted);

        telemetry_fixture
            .telemetry
            .save_opt_in_setting_field(&form)
            .unwrap();

        assert_eq!(
            telemetry_fixture
                .telemetry
                .status_object()
                .get_option()
                .optin("tec-common"),
            Some(expected)
        );
    }

    #[rstest]
    fn test_save_opt_in_setting_field_without_status_saves_false(
        telemetry_fixture: TelemetryFixture,
    ) {
        let form = SettingsForm::new().with_field(SETTINGS_TAB_FIELD, "general");
        telemetry_fixture
            .telemetry
            .save_opt_in_setting_field(&form)
            .unwrap();
        assert!(!telemetry_fixture.telemetry.status_object().is_active());
        assert!(
            telemetry_fixture
                .options
                .get_option(TELEMETRY_OPTION)
                .is_some()
        );
    }

    #[rstest]
    fn test_optin_tab_filters_run_generic_then_parent(telemetry_fixture: TelemetryFixture) {
        let hooks = &telemetry_fixture.hooks;
        hooks.add_filter(OPTIN_TAB_FILTER, None, |tab: &mut String, _: &()| {
            tab.push_str("-generic");
        });
        hooks.add_filter(
            "tec_common_telemetry_the-events-calendar_optin_tab",
            None,
            |tab: &mut String, _: &()| tab.push_str("-tec"),
        );

        let telemetry = &telemetry_fixture.telemetry;
        assert_eq!(telemetry.optin_tab(), "general-generic-tec");

        let form = SettingsForm::new()
            .with_field(SETTINGS_TAB_FIELD, "general-generic-tec")
            .with_field(OPTIN_STATUS_FIELD, "yes");
        telemetry.save_opt_in_setting_field(&form).unwrap();
        assert!(telemetry.status_object().is_active());
    }

    #[rstest]
    #[case(json!({"site": {"id": 7}}), true)]
    #[case(json!(""), false)]
    #[case(json!(false), false)]
    fn test_migrate_existing_opt_in(
        telemetry_fixture: TelemetryFixture,
        #[case] legacy: Value,
        #[case] expected: bool,
    ) {
        telemetry_fixture
            .options
            .update_option(LEGACY_OPTIN_OPTION, legacy)
            .unwrap();

        telemetry_fixture.telemetry.migrate_existing_opt_in().unwrap();

        assert_eq!(telemetry_fixture.telemetry.plugin_status(), expected);
    }

    #[rstest]
    fn test_migrate_without_legacy_option_writes_nothing(telemetry_fixture: TelemetryFixture) {
        telemetry_fixture.telemetry.migrate_existing_opt_in().unwrap();
        assert!(telemetry_fixture.options.is_empty());
    }

    #[rstest]
    fn test_plugin_status_missing_is_false(telemetry_fixture: TelemetryFixture) {
        telemetry_fixture
            .options
            .update_option(
                TELEMETRY_OPTION,
                json!({"plugins": {"event-tickets": {"optin": true}}}),
            )
            .unwrap();
        assert!(!telemetry_fixture.telemetry.plugin_status());
    }

    #[rstest]
    fn test_plugin_status_ignores_foreign_entry_shapes(telemetry_fixture: TelemetryFixture) {
        telemetry_fixture
            .options
            .update_option(
                TELEMETRY_OPTION,
                json!({
                    "token": "abc",
                    "plugins": {
                        "tec-common": {"optin": true},
                        "event-tickets": {"optin": 1},
                        "legacy": []
                    }
                }),
            )
            .unwrap();
        assert!(telemetry_fixture.telemetry.plugin_status());
    }

    #[rstest]
    fn test_plugin_status_is_filtered(telemetry_fixture: TelemetryFixture) {
        telemetry_fixture
            .telemetry
            .status_object()
            .set_status(true)
            .unwrap();
        assert!(telemetry_fixture.telemetry.plugin_status());

        telemetry_fixture.hooks.add_filter(
            "tec_common_telemetry_tec_optin_status",
            None,
            |status: &mut bool, _: &()| *status = false,
        );
        assert!(!telemetry_fixture.telemetry.plugin_status());
    }

    #[rstest]
    fn test_register_hooks(telemetry_fixture: TelemetryFixture) {
        let TelemetryFixture {
            telemetry,
            hooks,
            options,
            ..
        } = telemetry_fixture;
        let telemetry = Rc::new(telemetry);
        telemetry.register_hooks();

        let args = hooks.apply_filters(&telemetry.optin_arg_hook(), OptinArgs::new(), &());
        assert_eq!(args["plugin_slug"], json!("tec-common"));

        options
            .update_option(LEGACY_OPTIN_OPTION, json!({"site": 1}))
            .unwrap();
        hooks.do_action(ADMIN_INIT_ACTION, &());
        assert!(telemetry.plugin_status());

        let form = SettingsForm::new()
            .with_field(SETTINGS_TAB_FIELD, "general")
            .with_field(OPTIN_STATUS_FIELD, "0");
        hooks.do_action(SAVE_OPTIN_FIELD_ACTION, &form);
        assert!(!telemetry.plugin_status());
    }

    #[rstest]
    fn test_registered_hooks_outlive_telemetry_safely(telemetry_fixture: TelemetryFixture) {
        let TelemetryFixture {
            telemetry, hooks, ..
        } = telemetry_fixture;
        let telemetry = Rc::new(telemetry);
        let hook = telemetry.optin_arg_hook();
        telemetry.register_hooks();
        drop(telemetry);

        let args = hooks.apply_filters(&hook, OptinArgs::new(), &());
        assert!(args.is_empty());
        hooks.do_action(ADMIN_INIT_ACTION, &());
    }
}

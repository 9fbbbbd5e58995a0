//! Client for the FwESI remote-control server
//!
//! [`EsiRemote`] keeps a local snapshot of the saves, the active scenario and
//! the operator actors. Edits change the snapshot first and are then pushed to
//! the server, either right away (autocommit) or on [`EsiRemote::commit`].

use std::time::Duration;

use esi_connect::HttpTransport;
use esi_core_interface::routes;
use esi_core_interface::wire::{
    ActiveSaveDto, OperatorActorListDto, SaveFileDto, SaveLoadRequest, ServerAnswer,
};
use esi_core_interface::RemoteTransport;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::config::RemoteConfig;
use crate::error::{EsiError, Result};
use crate::model::{ActiveSave, AttrValue, FilterList, OperatorActor, PropertyType, Save};
use crate::ramp::LinearRamp;

/// Pause between ramp steps unless configured otherwise
pub const DEFAULT_RAMP_TICK: Duration = Duration::from_millis(50);

pub struct EsiRemote<T: RemoteTransport = HttpTransport> {
    transport: T,
    autocommit: bool,
    ramp_tick: Duration,
    saves: Vec<Save>,
    active: ActiveSave,
    operator_actors: Vec<OperatorActor>,
    pending_save: Option<String>,
}

impl EsiRemote<HttpTransport> {
    /// Connect over HTTP as described by `config` and load the initial snapshot
    pub async fn connect(config: &RemoteConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config.connect_config())?;
        let remote = Self::with_transport(transport, config.autocommit).await?;
        Ok(remote.with_ramp_tick(config.ramp_tick()))
    }
}

impl<T: RemoteTransport> EsiRemote<T> {
    /// Load the initial snapshot through `transport`
    pub async fn with_transport(transport: T, autocommit: bool) -> Result<Self> {
        info!("Connecting to FwESI at {}", transport.endpoint());

        let saves = fetch_saves(&transport).await?;
        let active = fetch_active(&transport).await?;
        let operator_actors = fetch_operator_actors(&transport).await?;

        info!(
            "Loaded {} saves and {} operator actors, active scenario '{}'",
            saves.len(),
            operator_actors.len(),
            active.scenario_name()
        );

        Ok(Self {
            transport,
            autocommit,
            ramp_tick: DEFAULT_RAMP_TICK,
            saves,
            active,
            operator_actors,
            pending_save: None,
        })
    }

    pub fn with_ramp_tick(mut self, tick: Duration) -> Self {
        self.ramp_tick = tick;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn autocommit(&self) -> bool {
        self.autocommit
    }

    pub fn set_autocommit(&mut self, autocommit: bool) {
        self.autocommit = autocommit;
    }

    // ---- snapshots ----

    /// Replace the save list; a queued load whose path is gone is dropped
    pub async fn update_saves(&mut self) -> Result<()> {
        self.saves = fetch_saves(&self.transport).await?;
        debug!("Refreshed {} saves", self.saves.len());

        if let Some(path) = self.pending_save.take() {
            if self.find_save(&path).is_some() {
                self.pending_save = Some(path);
            } else {
                warn!("Queued save '{}' no longer exists on the server, dropping it", path);
            }
        }
        Ok(())
    }

    pub async fn update_active(&mut self) -> Result<()> {
        self.active = fetch_active(&self.transport).await?;
        debug!("Active scenario is '{}'", self.active.scenario_name());
        Ok(())
    }

    /// Replace the actor snapshot; uncommitted actor edits are lost
    pub async fn update_operator_actors(&mut self) -> Result<()> {
        self.operator_actors = fetch_operator_actors(&self.transport).await?;
        debug!("Refreshed {} operator actors", self.operator_actors.len());
        Ok(())
    }

    pub async fn refresh(&mut self) -> Result<()> {
        self.update_saves().await?;
        self.update_active().await?;
        self.update_operator_actors().await
    }

    pub fn save_files(&self) -> FilterList<'_, Save> {
        FilterList::new(&self.saves)
    }

    pub fn active(&self) -> &ActiveSave {
        &self.active
    }

    pub fn operator_actors(&self) -> FilterList<'_, OperatorActor> {
        FilterList::new(&self.operator_actors)
    }

    /// Save or sub save with the given absolute path
    pub fn find_save(&self, absolute_path: &str) -> Option<&Save> {
        self.saves.iter().find_map(|save| save.find(absolute_path))
    }

    pub fn operator_actor(&self, id: i64) -> Option<&OperatorActor> {
        self.operator_actors.iter().find(|actor| actor.id() == id)
    }

    pub fn operator_actor_by_name(&self, name: &str) -> Option<&OperatorActor> {
        self.operator_actors.iter().find(|actor| actor.name() == name)
    }

    fn operator_actor_mut(&mut self, id: i64) -> Result<&mut OperatorActor> {
        let index = self.actor_index(id)?;
        Ok(&mut self.operator_actors[index])
    }

    fn actor_index(&self, id: i64) -> Result<usize> {
        self.operator_actors
            .iter()
            .position(|actor| actor.id() == id)
            .ok_or(EsiError::ActorNotFound(id))
    }

    // ---- edits ----

    /// Apply `edit` to the actor with `id`, then commit if autocommit is on.
    ///
    /// The edit runs on a copy of the actor. If it fails, the snapshot is left
    /// exactly as it was.
    ///
    /// ```rust,no_run
    /// # async fn demo(remote: &mut esi_remote::EsiRemote) -> esi_remote::Result<()> {
    /// remote
    ///     .edit_operator_actor(4, |truck| {
    ///         truck.set_visible(true);
    ///         truck.property_mut("DP_BlueLight")?.set_value(true)
    ///     })
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn edit_operator_actor<R, F>(&mut self, id: i64, edit: F) -> Result<R>
    where
        F: FnOnce(&mut OperatorActor) -> Result<R>,
    {
        let index = self.actor_index(id)?;
        let mut draft = self.operator_actors[index].clone();
        let outcome = edit(&mut draft)?;
        self.operator_actors[index] = draft;

        self.commit_operator_actors(false).await?;
        Ok(outcome)
    }

    pub async fn set_visible(&mut self, id: i64, visible: bool) -> Result<()> {
        self.edit_operator_actor(id, |actor| {
            actor.set_visible(visible);
            Ok(())
        })
        .await
    }

    pub async fn set_property(
        &mut self,
        id: i64,
        property: &str,
        value: impl Into<AttrValue>,
    ) -> Result<()> {
        let value = value.into();
        self.edit_operator_actor(id, |actor| actor.property_mut(property)?.set_value(value))
            .await
    }

    /// Select an enum value by its `enum_field_value`
    pub async fn set_enum_value(&mut self, id: i64, property_enum: &str, value: &str) -> Result<()> {
        self.edit_operator_actor(id, |actor| {
            actor.property_enum_mut(property_enum)?.set_current_by_value(value)
        })
        .await
    }

    pub async fn trigger_action(&mut self, id: i64, action: &str) -> Result<()> {
        self.edit_operator_actor(id, |actor| {
            actor.action_mut(action)?.trigger();
            Ok(())
        })
        .await
    }

    /// Write `is_visible` or a property by name; see [`OperatorActor::set_attribute`]
    pub async fn set_attribute(
        &mut self,
        id: i64,
        name: &str,
        value: impl Into<AttrValue>,
    ) -> Result<()> {
        let value = value.into();
        self.edit_operator_actor(id, |actor| actor.set_attribute(name, value))
            .await
    }

    // ---- saves ----

    /// Load a save (or sub save) now, regardless of autocommit
    pub async fn load_save(&mut self, absolute_path: &str) -> Result<()> {
        self.queue(absolute_path)?;
        self.commit_saves(true).await
    }

    /// Load a save on the next commit; loads right away under autocommit.
    /// Queuing again replaces an earlier queued save.
    pub async fn queue_save_load(&mut self, absolute_path: &str) -> Result<()> {
        self.queue(absolute_path)?;
        self.commit_saves(false).await
    }

    fn queue(&mut self, absolute_path: &str) -> Result<()> {
        if self.find_save(absolute_path).is_none() {
            return Err(EsiError::SaveNotFound(absolute_path.to_string()));
        }
        if let Some(previous) = self.pending_save.replace(absolute_path.to_string()) {
            debug!("Queued save '{}' replaces '{}'", absolute_path, previous);
        }
        Ok(())
    }

    /// The save waiting for the next commit, if any
    pub fn pending_save(&self) -> Option<&str> {
        self.pending_save.as_deref()
    }

    // ---- commit ----

    pub fn has_pending_changes(&self) -> bool {
        self.pending_save.is_some() || self.operator_actors.iter().any(OperatorActor::has_pending)
    }

    /// Push the queued save load, then every pending actor change
    pub async fn commit(&mut self) -> Result<()> {
        self.commit_saves(true).await?;
        self.commit_operator_actors(true).await
    }

    async fn commit_saves(&mut self, force: bool) -> Result<()> {
        if !(force || self.autocommit) {
            return Ok(());
        }
        let Some(path) = self.pending_save.clone() else {
            return Ok(());
        };

        info!("Loading save '{}'", path);
        let body = serde_json::to_value(SaveLoadRequest {
            absolute_path: path,
        })?;
        let answer = self.transport.put(routes::SAVE_FILES, &body).await?;
        check_answer(&answer, routes::SAVE_LOADED_ANSWER)?;
        self.pending_save = None;

        self.update_active().await?;
        self.update_saves().await
    }

    async fn commit_operator_actors(&mut self, force: bool) -> Result<()> {
        if !(force || self.autocommit) {
            return Ok(());
        }

        let mut sent = 0usize;
        for actor in self.operator_actors.iter_mut() {
            if send_actor_update(&self.transport, actor).await? {
                sent += 1;
            }
        }
        if sent > 0 {
            info!("Committed changes to {} operator actor(s)", sent);
        }

        self.update_operator_actors().await
    }

    /// Push the pending changes of one actor and re-read only that actor.
    /// Other actors keep their snapshot and their pending edits.
    async fn commit_actor(&mut self, id: i64) -> Result<()> {
        let index = self.actor_index(id)?;
        send_actor_update(&self.transport, &mut self.operator_actors[index]).await?;

        let fresh = fetch_operator_actors(&self.transport)
            .await?
            .into_iter()
            .find(|actor| actor.id() == id);
        match fresh {
            Some(actor) => self.operator_actors[index] = actor,
            None => {
                warn!("Operator actor {} disappeared from the server", id);
                self.operator_actors.remove(index);
            }
        }
        Ok(())
    }

    // ---- ramps ----

    /// Move a numeric property from `start` to `end` over `duration`, pushing
    /// one value per tick. Returns the number of values sent.
    ///
    /// Each step is sent right away, even with autocommit off. Only the ramped
    /// actor is committed; pending edits on other actors stay queued.
    pub async fn ramp_property(
        &mut self,
        id: i64,
        property: &str,
        start: f64,
        end: f64,
        duration: Duration,
    ) -> Result<usize> {
        let value_type = self
            .operator_actor(id)
            .ok_or(EsiError::ActorNotFound(id))?
            .property(property)
            .ok_or_else(|| EsiError::MemberNotFound {
                actor_id: id,
                kind: "property",
                name: property.to_string(),
            })?
            .value_type()
            .clone();
        // bool and string properties cannot be interpolated
        if !matches!(value_type, PropertyType::Int | PropertyType::Float) {
            return Err(EsiError::Unsupported(format!(
                "cannot ramp '{}' of type {}",
                property, value_type
            )));
        }

        let ramp = LinearRamp::new(start, end, duration, self.ramp_tick);
        info!(
            "Ramping '{}' of actor {} from {} to {} in {} steps",
            property,
            id,
            start,
            end,
            ramp.steps()
        );

        let mut interval = tokio::time::interval(ramp.tick());
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut pushed = 0;
        for value in ramp {
            interval.tick().await;
            self.operator_actor_mut(id)?
                .property_mut(property)?
                .set_value(value)?;
            self.commit_actor(id).await?;
            pushed += 1;
        }
        Ok(pushed)
    }
}

/// PUT one actor's pending update, if it has one. Returns whether anything was sent.
async fn send_actor_update<T: RemoteTransport>(
    transport: &T,
    actor: &mut OperatorActor,
) -> Result<bool> {
    let Some(update) = actor.pending_update() else {
        return Ok(false);
    };
    let body = serde_json::to_value(&update)?;
    debug!("Updating operator actor {}: {}", actor.id(), body);

    let answer = transport.put(routes::OPERATOR_ACTORS, &body).await?;
    check_answer(&answer, routes::ACTOR_UPDATED_ANSWER)?;
    actor.clear_pending();
    Ok(true)
}

fn check_answer(answer: &Value, expected: &str) -> Result<()> {
    if ServerAnswer::from_reply(answer).is_some_and(|reply| reply.is(expected)) {
        return Ok(());
    }
    Err(EsiError::UnexpectedAnswer {
        expected: expected.to_string(),
        actual: answer.to_string(),
    })
}

async fn fetch<T, D>(transport: &T, path: &str) -> Result<D>
where
    T: RemoteTransport,
    D: DeserializeOwned,
{
    let body = transport.get(path).await?;
    serde_json::from_value(body)
        .map_err(|e| EsiError::Protocol(format!("unexpected body from '{}': {}", path, e)))
}

async fn fetch_saves<T: RemoteTransport>(transport: &T) -> Result<Vec<Save>> {
    let saves: Vec<SaveFileDto> = fetch(transport, routes::SAVE_FILES).await?;
    Ok(saves.into_iter().map(Save::from).collect())
}

async fn fetch_active<T: RemoteTransport>(transport: &T) -> Result<ActiveSave> {
    let active: ActiveSaveDto = fetch(transport, routes::ACTIVE_SAVE).await?;
    Ok(active.into())
}

async fn fetch_operator_actors<T: RemoteTransport>(transport: &T) -> Result<Vec<OperatorActor>> {
    let list: OperatorActorListDto = fetch(transport, routes::OPERATOR_ACTORS).await?;
    list.operator_actors
        .into_iter()
        .map(OperatorActor::try_from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockTransport;
    use crate::model::Attributes;
    use serde_json::json;

    async fn remote(autocommit: bool) -> (EsiRemote<MockTransport>, MockTransport) {
        crate::logging::init_test_logging();
        let mock = MockTransport::fwesi();
        let remote = EsiRemote::with_transport(mock.clone(), autocommit)
            .await
            .unwrap()
            .with_ramp_tick(Duration::from_millis(1));
        (remote, mock)
    }

    #[tokio::test]
    async fn test_initial_snapshot() {
        let (remote, mock) = remote(true).await;
        assert_eq!(remote.save_files().len(), 2);
        assert_eq!(remote.active().scenario_name(), "Verkehrsunfall");
        assert_eq!(remote.operator_actors().len(), 2);
        assert_eq!(mock.get_count(routes::OPERATOR_ACTORS), 1);
        assert!(!remote.has_pending_changes());
    }

    #[tokio::test]
    async fn test_lookups() {
        let (remote, _) = remote(true).await;
        assert_eq!(remote.operator_actor_by_name("Fire Kitchen").map(|a| a.id()), Some(2));
        assert!(remote.operator_actor(99).is_none());
        assert_eq!(
            remote.find_save("C:/FwESI/saves/vu_nacht.sav").map(|s| s.scenario_id()),
            Some(11)
        );

        let vehicles = remote
            .operator_actors()
            .by_attributes(&[
                ("type", "emergency_vehicle".into()),
                ("is_visible", true.into()),
            ]);
        assert_eq!(vehicles.len(), 1);
        assert_eq!(vehicles[0].attribute("name"), Some(AttrValue::from("HLF 20")));
    }

    #[tokio::test]
    async fn test_autocommit_pushes_each_edit() {
        let (mut remote, mock) = remote(true).await;
        remote.set_property(1, "DP_PumpPressure", 8).await.unwrap();

        assert_eq!(
            mock.puts_to(routes::OPERATOR_ACTORS),
            vec![json!({"id": 1, "properties": [{"name": "DP_PumpPressure", "value": "8.0"}]})]
        );
        // refreshed after the commit
        assert_eq!(mock.get_count(routes::OPERATOR_ACTORS), 2);
        assert!(!remote.has_pending_changes());
    }

    #[tokio::test]
    async fn test_manual_commit_batches_per_actor() {
        let (mut remote, mock) = remote(false).await;
        remote.set_visible(2, true).await.unwrap();
        remote.set_property(2, "DP_Intensity", 7.8).await.unwrap();
        remote.set_enum_value(1, "DoorState", "OPEN").await.unwrap();
        remote.trigger_action(1, "Horn").await.unwrap();

        assert!(mock.puts().is_empty());
        assert!(remote.has_pending_changes());

        remote.commit().await.unwrap();
        let puts = mock.puts_to(routes::OPERATOR_ACTORS);
        assert_eq!(puts.len(), 2);
        assert_eq!(
            puts[0],
            json!({
                "id": 1,
                "propertyEnums": [{
                    "name": "DoorState",
                    "currentValue": {"enumFieldId": 0, "enumFieldValue": "OPEN"}
                }],
                "actions": [{"name": "Horn"}]
            })
        );
        assert_eq!(
            puts[1],
            json!({
                "id": 2,
                "isVisible": true,
                "properties": [{"name": "DP_Intensity", "value": "7"}]
            })
        );
        assert!(!remote.has_pending_changes());
    }

    #[tokio::test]
    async fn test_commit_without_changes_only_refreshes() {
        let (mut remote, mock) = remote(false).await;
        remote.commit().await.unwrap();
        assert!(mock.puts().is_empty());
        assert_eq!(mock.get_count(routes::OPERATOR_ACTORS), 2);
    }

    #[tokio::test]
    async fn test_refresh_discards_pending_edits() {
        let (mut remote, mock) = remote(false).await;
        remote.set_visible(1, false).await.unwrap();
        remote.update_operator_actors().await.unwrap();

        assert!(remote.operator_actor(1).unwrap().is_visible());
        assert!(!remote.has_pending_changes());
        remote.commit().await.unwrap();
        assert!(mock.puts().is_empty());
    }

    #[tokio::test]
    async fn test_unexpected_answer_keeps_pending_state() {
        let (mut remote, mock) = remote(false).await;
        mock.set_put_answer(routes::OPERATOR_ACTORS, json!({"answer": "no such actor"}));
        remote.set_visible(1, false).await.unwrap();
        remote.set_visible(2, true).await.unwrap();

        let err = remote.commit().await.unwrap_err();
        assert!(matches!(err, EsiError::UnexpectedAnswer { .. }));
        assert_eq!(err.exit_code(), crate::error::EXIT_REJECTED);
        // the first actor failed, so the second was never sent
        assert_eq!(mock.puts_to(routes::OPERATOR_ACTORS).len(), 1);
        assert!(remote.operator_actor(1).unwrap().has_pending());
        assert!(remote.operator_actor(2).unwrap().has_pending());
    }

    #[tokio::test]
    async fn test_unknown_targets() {
        let (mut remote, mock) = remote(true).await;
        assert!(matches!(
            remote.set_visible(42, true).await,
            Err(EsiError::ActorNotFound(42))
        ));
        assert!(matches!(
            remote.trigger_action(2, "Horn").await,
            Err(EsiError::MemberNotFound { .. })
        ));
        let err = remote
            .set_enum_value(1, "DoorState", "AJAR")
            .await
            .unwrap_err();
        assert!(matches!(err, EsiError::UnknownEnumValue { .. }));
        assert_eq!(err.exit_code(), crate::error::EXIT_USAGE);
        assert!(mock.puts().is_empty());
    }

    #[tokio::test]
    async fn test_non_finite_float_never_reaches_server() {
        let (mut remote, mock) = remote(true).await;
        for raw in ["NaN", "inf", "-inf"] {
            let err = remote
                .set_property(1, "DP_PumpPressure", raw)
                .await
                .unwrap_err();
            assert!(matches!(err, EsiError::InvalidValue(_)), "{}", raw);
        }
        let err = remote
            .set_property(1, "DP_PumpPressure", f64::NAN)
            .await
            .unwrap_err();
        assert!(matches!(err, EsiError::InvalidValue(_)));

        assert!(mock.puts().is_empty());
        assert!(!remote.has_pending_changes());
    }

    #[tokio::test]
    async fn test_failed_edit_leaves_actor_untouched() {
        let (mut remote, mock) = remote(true).await;
        let err = remote
            .edit_operator_actor(1, |hlf| {
                hlf.set_visible(false);
                hlf.property_mut("DP_Nope")?.set_value(1)?;
                Ok(())
            })
            .await
            .unwrap_err();
        assert!(matches!(err, EsiError::MemberNotFound { .. }));
        assert!(mock.puts().is_empty());
        assert!(!remote.has_pending_changes());
        assert!(remote.operator_actor(1).unwrap().is_visible());

        // the half-applied visibility change must not ride along later
        remote.trigger_action(1, "Horn").await.unwrap();
        assert_eq!(
            mock.puts_to(routes::OPERATOR_ACTORS),
            vec![json!({"id": 1, "actions": [{"name": "Horn"}]})]
        );
    }

    #[tokio::test]
    async fn test_server_answer_with_wrong_shape_is_rejected() {
        let (mut remote, mock) = remote(true).await;
        mock.set_put_answer(routes::OPERATOR_ACTORS, json!("actor has been updated"));
        let err = remote.set_visible(1, false).await.unwrap_err();
        assert!(matches!(err, EsiError::UnexpectedAnswer { .. }));

        mock.set_put_answer(
            routes::OPERATOR_ACTORS,
            json!({"answer": "actor has been updated", "id": 1}),
        );
        remote.set_visible(1, false).await.unwrap();
        assert!(!remote.has_pending_changes());
    }

    #[tokio::test]
    async fn test_set_attribute_rejects_read_only_fields() {
        let (mut remote, mock) = remote(true).await;
        remote.set_attribute(1, "DP_BlueLight", "true").await.unwrap();
        assert_eq!(
            mock.puts_to(routes::OPERATOR_ACTORS)[0],
            json!({"id": 1, "properties": [{"name": "DP_BlueLight", "value": "true"}]})
        );

        let err = remote.set_attribute(1, "type", "civil").await.unwrap_err();
        assert!(matches!(err, EsiError::Unsupported(_)));
    }

    #[tokio::test]
    async fn test_load_save_refreshes_active_and_saves() {
        let (mut remote, mock) = remote(false).await;
        mock.set_response(
            routes::ACTIVE_SAVE,
            json!({"scenarioId": 2, "scenarioName": "Zimmerbrand"}),
        );

        remote.load_save("C:/FwESI/saves/zimmerbrand.sav").await.unwrap();
        assert_eq!(
            mock.puts_to(routes::SAVE_FILES),
            vec![json!({"absolutePath": "C:/FwESI/saves/zimmerbrand.sav"})]
        );
        assert_eq!(remote.active().scenario_id(), 2);
        assert_eq!(mock.get_count(routes::SAVE_FILES), 2);
        assert!(remote.pending_save().is_none());
    }

    #[tokio::test]
    async fn test_queued_save_last_wins() {
        let (mut remote, mock) = remote(false).await;
        remote.queue_save_load("C:/FwESI/saves/vu.sav").await.unwrap();
        remote.queue_save_load("C:/FwESI/saves/vu_nacht.sav").await.unwrap();
        assert!(mock.puts().is_empty());
        assert_eq!(remote.pending_save(), Some("C:/FwESI/saves/vu_nacht.sav"));

        remote.commit().await.unwrap();
        assert_eq!(
            mock.puts_to(routes::SAVE_FILES),
            vec![json!({"absolutePath": "C:/FwESI/saves/vu_nacht.sav"})]
        );
    }

    #[tokio::test]
    async fn test_queue_under_autocommit_loads_at_once() {
        let (mut remote, mock) = remote(true).await;
        remote.queue_save_load("C:/FwESI/saves/vu.sav").await.unwrap();
        assert_eq!(mock.puts_to(routes::SAVE_FILES).len(), 1);
    }

    #[tokio::test]
    async fn test_refresh_drops_vanished_queued_save() {
        let (mut remote, mock) = remote(false).await;
        remote.queue_save_load("C:/FwESI/saves/zimmerbrand.sav").await.unwrap();

        mock.set_response(
            routes::SAVE_FILES,
            json!([{
                "scenarioId": 1,
                "scenarioName": "Verkehrsunfall",
                "categoryName": "THL",
                "absolutePath": "C:/FwESI/saves/vu.sav",
                "subSaves": []
            }]),
        );
        remote.update_saves().await.unwrap();
        assert!(remote.pending_save().is_none());

        remote.commit().await.unwrap();
        assert!(mock.puts_to(routes::SAVE_FILES).is_empty());
    }

    #[tokio::test]
    async fn test_refresh_keeps_queued_save_that_still_exists() {
        let (mut remote, _) = remote(false).await;
        remote.queue_save_load("C:/FwESI/saves/vu_nacht.sav").await.unwrap();
        remote.update_saves().await.unwrap();
        assert_eq!(remote.pending_save(), Some("C:/FwESI/saves/vu_nacht.sav"));
    }

    #[tokio::test]
    async fn test_unknown_save_and_rejected_load() {
        let (mut remote, mock) = remote(true).await;
        assert!(matches!(
            remote.load_save("C:/nowhere.sav").await,
            Err(EsiError::SaveNotFound(_))
        ));

        mock.set_put_answer(routes::SAVE_FILES, json!({"answer": "file not found"}));
        let err = remote.load_save("C:/FwESI/saves/vu.sav").await.unwrap_err();
        assert!(matches!(err, EsiError::UnexpectedAnswer { .. }));
        assert_eq!(remote.pending_save(), Some("C:/FwESI/saves/vu.sav"));
    }

    #[tokio::test]
    async fn test_ramp_pushes_every_step() {
        let (mut remote, mock) = remote(false).await;
        let pushed = remote
            .ramp_property(1, "DP_PumpPressure", 0.0, 4.0, Duration::from_millis(4))
            .await
            .unwrap();

        assert_eq!(pushed, 5);
        let values: Vec<Value> = mock
            .puts_to(routes::OPERATOR_ACTORS)
            .into_iter()
            .map(|body| body["properties"][0]["value"].clone())
            .collect();
        assert_eq!(values, vec![json!("0.0"), json!("1.0"), json!("2.0"), json!("3.0"), json!("4.0")]);
    }

    #[tokio::test]
    async fn test_ramp_leaves_other_actors_pending() {
        let (mut remote, mock) = remote(false).await;
        remote.set_visible(2, true).await.unwrap();

        remote
            .ramp_property(1, "DP_PumpPressure", 0.0, 2.0, Duration::from_millis(2))
            .await
            .unwrap();

        let puts = mock.puts_to(routes::OPERATOR_ACTORS);
        assert_eq!(puts.len(), 3);
        assert!(puts.iter().all(|body| body["id"] == 1));

        let kitchen = remote.operator_actor(2).unwrap();
        assert!(kitchen.has_pending());
        assert!(kitchen.is_visible());

        remote.commit().await.unwrap();
        assert_eq!(
            mock.puts_to(routes::OPERATOR_ACTORS).last(),
            Some(&json!({"id": 2, "isVisible": true}))
        );
    }

    #[tokio::test]
    async fn test_ramp_rejects_non_numeric_property() {
        let (mut remote, _) = remote(true).await;
        let err = remote
            .ramp_property(1, "DP_BlueLight", 0.0, 1.0, Duration::from_millis(2))
            .await
            .unwrap_err();
        assert!(matches!(err, EsiError::Unsupported(_)));
    }

    #[tokio::test]
    async fn test_malformed_body_is_protocol_error() {
        let mock = MockTransport::fwesi();
        mock.set_response(routes::ACTIVE_SAVE, json!({"scenario": "?"}));
        let err = EsiRemote::with_transport(mock, true).await.err().unwrap();
        assert!(matches!(err, EsiError::Protocol(_)));
    }
}

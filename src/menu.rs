//! The menu scene and the restart path. Entering `GameOver` records the
//! best score and bounces straight back here; each scene tears its own
//! entities down on exit, so repeated runs never accumulate state.

use bevy::prelude::*;

use crate::assets::GameAssets;
use crate::config::GameConfig;
use crate::player::spawn_bird;
use crate::save_load::{save_best_score, BestScore};
use crate::score::Score;
use crate::world::spawn_backdrop;
use crate::{despawn_scene, GameState, SceneTag};

pub struct MenuPlugin;

impl Plugin for MenuPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Menu), spawn_menu)
            .add_systems(
                Update,
                (start_button_system, start_key_system).run_if(in_state(GameState::Menu)),
            )
            .add_systems(OnExit(GameState::Menu), cleanup_menu)
            .add_systems(OnEnter(GameState::GameOver), finish_run)
            .add_systems(OnExit(GameState::GameOver), cleanup_game_scene);
    }
}

#[derive(Component)]
struct StartButton;

/// The menu is the playfield at rest: backdrop, a static bird preview,
/// the start button, and the best score so far.
fn spawn_menu(
    mut commands: Commands,
    config: Res<GameConfig>,
    assets: Res<GameAssets>,
    best: Res<BestScore>,
) {
    spawn_backdrop(&mut commands, &config, &assets, SceneTag::Menu);
    spawn_bird(&mut commands, &config, &assets, SceneTag::Menu);

    let Some(button) = assets.button.clone() else {
        error!("menu scene requires the start button image");
        return;
    };

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                row_gap: Val::Px(24.0),
                ..default()
            },
            SceneTag::Menu,
        ))
        .with_children(|parent| {
            parent.spawn((
                Button,
                StartButton,
                ImageNode::new(button),
                Node {
                    width: Val::Px(160.0),
                    height: Val::Px(56.0),
                    ..default()
                },
            ));
            parent.spawn((
                Text::new(format!("BEST {}", best.0)),
                TextFont::from_font_size(24.0),
                TextColor(Color::WHITE),
            ));
        });
}

fn start_button_system(
    interactions: Query<&Interaction, (Changed<Interaction>, With<StartButton>)>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for interaction in &interactions {
        if *interaction == Interaction::Pressed {
            next_state.set(GameState::Playing);
        }
    }
}

/// The jump key doubles as the start trigger while the menu is up. Edge
/// triggered, so one press is one transition even across the frames it
/// takes the state change to apply.
fn start_key_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keys.just_pressed(KeyCode::Space) {
        next_state.set(GameState::Playing);
    }
}

fn cleanup_menu(mut commands: Commands, entities: Query<(Entity, &SceneTag)>) {
    despawn_scene(&mut commands, &entities, SceneTag::Menu);
}

/// Game over is a bounce, not a screen: record the best score, then
/// return to the menu for the next run.
fn finish_run(
    score: Res<Score>,
    mut best: ResMut<BestScore>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if score.0 > best.0 {
        best.0 = score.0;
        save_best_score(&best);
    }
    next_state.set(GameState::Menu);
}

fn cleanup_game_scene(mut commands: Commands, entities: Query<(Entity, &SceneTag)>) {
    despawn_scene(&mut commands, &entities, SceneTag::Game);
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;

    #[test]
    fn start_key_moves_the_menu_into_play_once() {
        let mut app = App::new();
        app.add_plugins(StatesPlugin)
            .insert_state(GameState::Menu)
            .init_resource::<ButtonInput<KeyCode>>()
            .add_systems(
                Update,
                start_key_system.run_if(in_state(GameState::Menu)),
            )
            .add_systems(OnExit(GameState::Menu), cleanup_menu);

        let menu_entity = app.world_mut().spawn(SceneTag::Menu).id();
        let game_entity = app.world_mut().spawn(SceneTag::Game).id();

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::Space);
        app.update();
        app.update();

        assert_eq!(
            *app.world().resource::<State<GameState>>().get(),
            GameState::Playing
        );
        // Menu entities went with the scene; the game scene was left alone.
        assert!(app.world().get_entity(menu_entity).is_err());
        assert!(app.world().get_entity(game_entity).is_ok());
    }

    #[test]
    fn button_press_moves_the_menu_into_play() {
        let mut app = App::new();
        app.add_plugins(StatesPlugin)
            .insert_state(GameState::Menu)
            .add_systems(
                Update,
                start_button_system.run_if(in_state(GameState::Menu)),
            );

        // A freshly spawned pressed button counts as a changed interaction.
        app.world_mut().spawn((StartButton, Interaction::Pressed));
        app.update();
        app.update();

        assert_eq!(
            *app.world().resource::<State<GameState>>().get(),
            GameState::Playing
        );
    }

    #[test]
    fn finish_run_records_a_new_best_and_bounces_to_menu() {
        let mut app = App::new();
        app.add_plugins(StatesPlugin)
            .insert_state(GameState::Playing)
            .insert_resource(Score(7))
            .insert_resource(BestScore(3))
            .add_systems(OnEnter(GameState::GameOver), finish_run);

        app.world_mut()
            .resource_mut::<NextState<GameState>>()
            .set(GameState::GameOver);
        app.update();
        app.update();

        assert_eq!(app.world().resource::<BestScore>().0, 7);
        assert_eq!(
            *app.world().resource::<State<GameState>>().get(),
            GameState::Menu
        );
    }

    #[test]
    fn finish_run_keeps_a_higher_best() {
        let mut app = App::new();
        app.add_plugins(StatesPlugin)
            .insert_state(GameState::Playing)
            .insert_resource(Score(2))
            .insert_resource(BestScore(9))
            .add_systems(OnEnter(GameState::GameOver), finish_run);

        app.world_mut()
            .resource_mut::<NextState<GameState>>()
            .set(GameState::GameOver);
        app.update();

        assert_eq!(app.world().resource::<BestScore>().0, 9);
    }
}

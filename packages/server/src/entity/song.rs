use common::SongFeatures;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "song")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,
    pub artist: String,
    pub image_url: Option<String>,
    /// 30-second preview clip.
    pub preview_url: Option<String>,

    /// Global tempo in BPM, NULL until the song is analysed.
    pub tempo: Option<f64>,
    /// Audio features stored as a JSON array of numbers.
    pub features: Option<Json>,

    #[sea_orm(has_many)]
    pub playlist_entries: HasMany<super::playlist_song::Entity>,

    #[sea_orm(has_one)]
    pub candidate: HasOne<super::tournament_song::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Analysed features, if both tempo and a numeric feature vector are present.
    pub fn analysed_features(&self) -> Option<SongFeatures> {
        let tempo = self.tempo?;
        let vector: Vec<f64> = serde_json::from_value(self.features.clone()?).ok()?;
        Some(SongFeatures::new(tempo, vector))
    }
}

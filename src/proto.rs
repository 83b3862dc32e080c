//! Protobuf schema for demo payloads.
//!
//! Message layouts follow the `CDemo*` messages of the game's `demo.proto`.
//! Every field is optional on the wire, so an empty payload decodes to a
//! message with all fields unset.
//!
//! _Requires Cargo feature `proto`._

use alloc::{string::String, vec::Vec};

use prost::Message as _;
use thiserror::Error;

use crate::{avec::Schema, sans::dispatch::PayloadClass};

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CDemoStop {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CDemoFileHeader {
    #[prost(string, optional, tag = "1")]
    pub demo_file_stamp: Option<String>,
    #[prost(int32, optional, tag = "2")]
    pub network_protocol: Option<i32>,
    #[prost(string, optional, tag = "3")]
    pub server_name: Option<String>,
    #[prost(string, optional, tag = "4")]
    pub client_name: Option<String>,
    #[prost(string, optional, tag = "5")]
    pub map_name: Option<String>,
    #[prost(string, optional, tag = "6")]
    pub game_directory: Option<String>,
    #[prost(int32, optional, tag = "7")]
    pub fullpackets_version: Option<i32>,
    #[prost(bool, optional, tag = "8")]
    pub allow_clientside_entities: Option<bool>,
    #[prost(bool, optional, tag = "9")]
    pub allow_clientside_particles: Option<bool>,
    #[prost(string, optional, tag = "10")]
    pub addons: Option<String>,
    #[prost(string, optional, tag = "11")]
    pub demo_version_name: Option<String>,
    #[prost(string, optional, tag = "12")]
    pub demo_version_guid: Option<String>,
    #[prost(int32, optional, tag = "13")]
    pub build_num: Option<i32>,
    #[prost(string, optional, tag = "14")]
    pub game: Option<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CGameInfo {
    #[prost(message, optional, tag = "4")]
    pub dota: Option<c_game_info::CDotaGameInfo>,
}

pub mod c_game_info {
    use alloc::{string::String, vec::Vec};

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct CDotaGameInfo {
        #[prost(uint64, optional, tag = "1")]
        pub match_id: Option<u64>,
        #[prost(int32, optional, tag = "2")]
        pub game_mode: Option<i32>,
        #[prost(int32, optional, tag = "3")]
        pub game_winner: Option<i32>,
        #[prost(message, repeated, tag = "4")]
        pub player_info: Vec<c_dota_game_info::CPlayerInfo>,
        #[prost(uint32, optional, tag = "5")]
        pub leagueid: Option<u32>,
        #[prost(message, repeated, tag = "6")]
        pub picks_bans: Vec<c_dota_game_info::CHeroSelectEvent>,
        #[prost(uint32, optional, tag = "7")]
        pub radiant_team_id: Option<u32>,
        #[prost(uint32, optional, tag = "8")]
        pub dire_team_id: Option<u32>,
        #[prost(string, optional, tag = "9")]
        pub radiant_team_tag: Option<String>,
        #[prost(string, optional, tag = "10")]
        pub dire_team_tag: Option<String>,
        #[prost(uint32, optional, tag = "11")]
        pub end_time: Option<u32>,
    }

    pub mod c_dota_game_info {
        use alloc::string::String;

        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct CPlayerInfo {
            #[prost(string, optional, tag = "1")]
            pub hero_name: Option<String>,
            #[prost(string, optional, tag = "2")]
            pub player_name: Option<String>,
            #[prost(bool, optional, tag = "3")]
            pub is_fake_client: Option<bool>,
            #[prost(uint64, optional, tag = "4")]
            pub steamid: Option<u64>,
            #[prost(int32, optional, tag = "5")]
            pub game_team: Option<i32>,
        }

        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct CHeroSelectEvent {
            #[prost(bool, optional, tag = "1")]
            pub is_pick: Option<bool>,
            #[prost(uint32, optional, tag = "2")]
            pub team: Option<u32>,
            #[prost(uint32, optional, tag = "3")]
            pub hero_id: Option<u32>,
        }
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CDemoFileInfo {
    #[prost(float, optional, tag = "1")]
    pub playback_time: Option<f32>,
    #[prost(int32, optional, tag = "2")]
    pub playback_ticks: Option<i32>,
    #[prost(int32, optional, tag = "3")]
    pub playback_frames: Option<i32>,
    #[prost(message, optional, tag = "4")]
    pub game_info: Option<CGameInfo>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CDemoSyncTick {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CDemoSendTables {
    #[prost(bytes = "vec", optional, tag = "1")]
    pub data: Option<Vec<u8>>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CDemoClassInfo {
    #[prost(message, repeated, tag = "1")]
    pub classes: Vec<c_demo_class_info::ClassT>,
}

pub mod c_demo_class_info {
    use alloc::string::String;

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct ClassT {
        #[prost(int32, optional, tag = "1")]
        pub class_id: Option<i32>,
        #[prost(string, optional, tag = "2")]
        pub network_name: Option<String>,
        #[prost(string, optional, tag = "3")]
        pub table_name: Option<String>,
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CDemoStringTables {
    #[prost(message, repeated, tag = "1")]
    pub tables: Vec<c_demo_string_tables::TableT>,
}

pub mod c_demo_string_tables {
    use alloc::{string::String, vec::Vec};

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct ItemsT {
        #[prost(string, optional, tag = "1")]
        pub str: Option<String>,
        #[prost(bytes = "vec", optional, tag = "2")]
        pub data: Option<Vec<u8>>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct TableT {
        #[prost(string, optional, tag = "1")]
        pub table_name: Option<String>,
        #[prost(message, repeated, tag = "2")]
        pub items: Vec<ItemsT>,
        #[prost(message, repeated, tag = "3")]
        pub items_clientside: Vec<ItemsT>,
        #[prost(int32, optional, tag = "4")]
        pub table_flags: Option<i32>,
    }
}

/// Envelope of `Packet` and `SignonPacket` payloads.
///
/// `data` holds the nested message stream.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CDemoPacket {
    #[prost(bytes = "vec", optional, tag = "3")]
    pub data: Option<Vec<u8>>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CDemoConsoleCmd {
    #[prost(string, optional, tag = "1")]
    pub cmdstring: Option<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CDemoCustomData {
    #[prost(int32, optional, tag = "1")]
    pub callback_index: Option<i32>,
    #[prost(bytes = "vec", optional, tag = "2")]
    pub data: Option<Vec<u8>>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CDemoCustomDataCallbacks {
    #[prost(string, repeated, tag = "1")]
    pub save_id: Vec<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CDemoUserCmd {
    #[prost(int32, optional, tag = "1")]
    pub cmd_number: Option<i32>,
    #[prost(bytes = "vec", optional, tag = "2")]
    pub data: Option<Vec<u8>>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CDemoFullPacket {
    #[prost(message, optional, tag = "1")]
    pub string_table: Option<CDemoStringTables>,
    #[prost(message, optional, tag = "2")]
    pub packet: Option<CDemoPacket>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CDemoSaveGame {
    #[prost(bytes = "vec", optional, tag = "1")]
    pub data: Option<Vec<u8>>,
    #[prost(fixed64, optional, tag = "2")]
    pub steam_id: Option<u64>,
    #[prost(fixed64, optional, tag = "3")]
    pub signature: Option<u64>,
    #[prost(int32, optional, tag = "4")]
    pub version: Option<i32>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CDemoSpawnGroups {
    #[prost(bytes = "vec", repeated, tag = "3")]
    pub msgs: Vec<Vec<u8>>,
}

/// A decoded payload, one variant per payload class.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Stop(CDemoStop),
    FileHeader(CDemoFileHeader),
    FileInfo(CDemoFileInfo),
    SyncTick(CDemoSyncTick),
    SendTables(CDemoSendTables),
    ClassInfo(CDemoClassInfo),
    StringTables(CDemoStringTables),
    Packet(CDemoPacket),
    SignonPacket(CDemoPacket),
    ConsoleCmd(CDemoConsoleCmd),
    CustomData(CDemoCustomData),
    CustomDataCallbacks(CDemoCustomDataCallbacks),
    UserCmd(CDemoUserCmd),
    FullPacket(CDemoFullPacket),
    SaveGame(CDemoSaveGame),
    SpawnGroups(CDemoSpawnGroups),
}

impl Message {
    pub fn class(&self) -> PayloadClass {
        match self {
            Self::Stop(_) => PayloadClass::Stop,
            Self::FileHeader(_) => PayloadClass::FileHeader,
            Self::FileInfo(_) => PayloadClass::FileInfo,
            Self::SyncTick(_) => PayloadClass::SyncTick,
            Self::SendTables(_) => PayloadClass::SendTables,
            Self::ClassInfo(_) => PayloadClass::ClassInfo,
            Self::StringTables(_) => PayloadClass::StringTables,
            Self::Packet(_) => PayloadClass::Packet,
            Self::SignonPacket(_) => PayloadClass::SignonPacket,
            Self::ConsoleCmd(_) => PayloadClass::ConsoleCmd,
            Self::CustomData(_) => PayloadClass::CustomData,
            Self::CustomDataCallbacks(_) => PayloadClass::CustomDataCallbacks,
            Self::UserCmd(_) => PayloadClass::UserCmd,
            Self::FullPacket(_) => PayloadClass::FullPacket,
            Self::SaveGame(_) => PayloadClass::SaveGame,
            Self::SpawnGroups(_) => PayloadClass::SpawnGroups,
        }
    }
}

/// Errors occurring while decoding a payload.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Malformed Protobuf data.
    #[error(transparent)]
    Decode(#[from] prost::DecodeError),
    /// The payload class has no schema.
    #[error("No schema for {0} payloads.")]
    Unsupported(PayloadClass),
}

/// A [`Schema`] decoding payloads into [`Message`]s.
///
/// Embedded classes are supported too, so their envelopes can be decoded
/// directly from captured payload bytes.
///
/// _Requires Cargo feature `proto`._
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoSchema;

impl Schema for DemoSchema {
    type Message = Message;
    type Error = SchemaError;

    fn decode(&self, class: PayloadClass, r: &[u8]) -> Result<Message, SchemaError> {
        Ok(match class {
            PayloadClass::Stop => Message::Stop(CDemoStop::decode(r)?),
            PayloadClass::FileHeader => Message::FileHeader(CDemoFileHeader::decode(r)?),
            PayloadClass::FileInfo => Message::FileInfo(CDemoFileInfo::decode(r)?),
            PayloadClass::SyncTick => Message::SyncTick(CDemoSyncTick::decode(r)?),
            PayloadClass::SendTables => Message::SendTables(CDemoSendTables::decode(r)?),
            PayloadClass::ClassInfo => Message::ClassInfo(CDemoClassInfo::decode(r)?),
            PayloadClass::StringTables => Message::StringTables(CDemoStringTables::decode(r)?),
            PayloadClass::Packet => Message::Packet(CDemoPacket::decode(r)?),
            PayloadClass::SignonPacket => Message::SignonPacket(CDemoPacket::decode(r)?),
            PayloadClass::ConsoleCmd => Message::ConsoleCmd(CDemoConsoleCmd::decode(r)?),
            PayloadClass::CustomData => Message::CustomData(CDemoCustomData::decode(r)?),
            PayloadClass::CustomDataCallbacks => {
                Message::CustomDataCallbacks(CDemoCustomDataCallbacks::decode(r)?)
            }
            PayloadClass::UserCmd => Message::UserCmd(CDemoUserCmd::decode(r)?),
            PayloadClass::FullPacket => Message::FullPacket(CDemoFullPacket::decode(r)?),
            PayloadClass::SaveGame => Message::SaveGame(CDemoSaveGame::decode(r)?),
            PayloadClass::SpawnGroups => Message::SpawnGroups(CDemoSpawnGroups::decode(r)?),
            PayloadClass::Unknown => Err(SchemaError::Unsupported(class))?,
        })
    }
}

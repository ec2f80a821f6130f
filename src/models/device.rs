use std::fmt;
use std::str::FromStr;

use crate::VManageError;

/// Device inventory groups served by `/system/device/{category}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceCategory {
    Vedges,
    Controllers,
}

impl DeviceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceCategory::Vedges => "vedges",
            DeviceCategory::Controllers => "controllers",
        }
    }
}

impl FromStr for DeviceCategory {
    type Err = VManageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vedges" => Ok(DeviceCategory::Vedges),
            "controllers" => Ok(DeviceCategory::Controllers),
            other => Err(VManageError::InvalidArgument(format!(
                "Invalid device type: {other}"
            ))),
        }
    }
}

impl fmt::Display for DeviceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-device operational data, each read from `/device/...?deviceId={id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceStatistic {
    ArpTable,
    BgpSummary,
    BgpRoutes,
    BgpNeighbors,
    OspfRoutes,
    OspfNeighbors,
    OspfDatabase,
    OspfDatabaseSummary,
    OspfInterfaces,
    TransportConnection,
    TunnelStatistics,
    OmpPeers,
    /// OMP peers as synced to vManage rather than read from the device.
    OmpSyncedPeers,
    OmpSummary,
    CellularModem,
    CellularNetwork,
    CellularProfiles,
    CellularRadio,
    CellularStatus,
    CellularSessions,
    IpsecInbound,
    IpsecOutbound,
    IpsecLocalSa,
}

impl DeviceStatistic {
    /// Path below the dataservice root, without the query string.
    pub fn path(&self) -> &'static str {
        match self {
            DeviceStatistic::ArpTable => "/device/arp",
            DeviceStatistic::BgpSummary => "/device/bgp/summary",
            DeviceStatistic::BgpRoutes => "/device/bgp/routes",
            DeviceStatistic::BgpNeighbors => "/device/bgp/neighbors",
            DeviceStatistic::OspfRoutes => "/device/ospf/routes",
            DeviceStatistic::OspfNeighbors => "/device/ospf/neighbor",
            DeviceStatistic::OspfDatabase => "/device/ospf/database",
            DeviceStatistic::OspfDatabaseSummary => "/device/ospf/databasesummary",
            DeviceStatistic::OspfInterfaces => "/device/ospf/interface",
            DeviceStatistic::TransportConnection => "/device/transport/connection",
            DeviceStatistic::TunnelStatistics => "/device/tunnel/statistics",
            DeviceStatistic::OmpPeers => "/device/omp/peers",
            DeviceStatistic::OmpSyncedPeers => "/device/omp/synced/peers",
            DeviceStatistic::OmpSummary => "/device/omp/summary",
            DeviceStatistic::CellularModem => "/device/cellular/modem",
            DeviceStatistic::CellularNetwork => "/device/cellular/network",
            DeviceStatistic::CellularProfiles => "/device/cellular/profiles",
            DeviceStatistic::CellularRadio => "/device/cellular/radio",
            DeviceStatistic::CellularStatus => "/device/cellular/status",
            DeviceStatistic::CellularSessions => "/device/cellular/sessions",
            DeviceStatistic::IpsecInbound => "/device/ipsec/inbound",
            DeviceStatistic::IpsecOutbound => "/device/ipsec/outbound",
            DeviceStatistic::IpsecLocalSa => "/device/ipsec/localsa",
        }
    }
}

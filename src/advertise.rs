//! mDNS announcement of the trigger endpoint.

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr, UdpSocket};
use std::time::Duration;

use mdns_sd::{ServiceDaemon, ServiceInfo};
use tracing::{info, warn};

pub const SERVICE_TYPE: &str = "_wakeplay._tcp.local.";

/// An active registration. Call [`Advertiser::shutdown`] before exit.
pub struct Advertiser {
    daemon: ServiceDaemon,
    fullname: String,
}

/// Register the trigger endpoint. Failures are logged and yield `None`.
pub fn advertise(bind: SocketAddr) -> Option<Advertiser> {
    let daemon = match ServiceDaemon::new() {
        Ok(d) => d,
        Err(e) => {
            warn!(error = %e, "mdns: daemon start failed");
            return None;
        }
    };

    let host_base = gethostname::gethostname().to_string_lossy().to_string();
    let host = host_name(&host_base);
    let ip = if bind.ip().is_unspecified() {
        local_ip().unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST))
    } else {
        bind.ip()
    };
    let properties: HashMap<String, String> = [
        ("path".to_string(), "/trigger".to_string()),
        ("version".to_string(), env!("CARGO_PKG_VERSION").to_string()),
    ]
    .into_iter()
    .collect();

    let info = match ServiceInfo::new(SERVICE_TYPE, &host_base, &host, ip, bind.port(), properties)
    {
        Ok(info) => info,
        Err(e) => {
            warn!(error = %e, "mdns: invalid service info");
            return None;
        }
    };
    let fullname = info.get_fullname().to_string();
    if let Err(e) = daemon.register(info) {
        warn!(error = %e, "mdns: register failed");
        return None;
    }

    info!(
        instance = %fullname,
        addr = %SocketAddr::new(ip, bind.port()),
        "mdns: advertised trigger endpoint"
    );
    Some(Advertiser { daemon, fullname })
}

impl Advertiser {
    /// Unregister and stop the daemon.
    pub fn shutdown(self) {
        if let Ok(rx) = self.daemon.unregister(&self.fullname) {
            let _ = rx.recv_timeout(Duration::from_secs(1));
        }
        if let Ok(rx) = self.daemon.shutdown() {
            let _ = rx.recv_timeout(Duration::from_secs(1));
        }
        info!("mdns: unregistered");
    }
}

fn host_name(base: &str) -> String {
    if base.ends_with(".local.") {
        base.to_string()
    } else {
        format!("{}.local.", base.trim_end_matches('.'))
    }
}

/// Best-effort outbound interface address.
fn local_ip() -> Option<IpAddr> {
    let socket = UdpSocket::bind("0.0.0.0:0").ok()?;
    if socket.connect("8.8.8.8:80").is_err() && socket.connect("1.1.1.1:80").is_err() {
        return None;
    }
    socket.local_addr().ok().map(|addr| addr.ip())
}

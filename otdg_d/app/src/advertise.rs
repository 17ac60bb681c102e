use log::info;
use mdns_sd::{ServiceDaemon, ServiceInfo};

/// Registers the daemon on the local network so the wrist sensor can find
/// it without a configured address. The returned daemon must be kept
/// alive for the registration to stay visible.
pub fn register(port: u16) -> anyhow::Result<ServiceDaemon> {
    let mdns = ServiceDaemon::new()?;
    let service_type = "_otdg._tcp.local.";
    let instance_name = "OTDGasl";
    let host_name = format!("otdg_d_{}.local.", port);

    let properties = [("txtv", "0"), ("lo", "1"), ("la", "2")];

    let service_info = ServiceInfo::new(
        service_type,
        instance_name,
        &host_name,
        "",
        port,
        &properties[..],
    )?
    .enable_addr_auto();

    mdns.register(service_info)?;
    info!(
        "Advertised via mDNS: {} on port {}",
        instance_name, port
    );
    Ok(mdns)
}

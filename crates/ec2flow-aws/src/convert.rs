//! SDK response types → ec2flow wrapper types
//!
//! Missing optional fields become `None` or empty collections.

use aws_sdk_ec2::operation::create_key_pair::CreateKeyPairOutput;
use aws_sdk_ec2::operation::import_key_pair::ImportKeyPairOutput;
use aws_sdk_ec2::primitives::DateTime;
use aws_sdk_ec2::types as sdk;
use chrono::Utc;
use ec2flow_compute::{
    AvailabilityZone, Filter, GroupIdentifier, Instance, InstanceState, InstanceStateChange,
    InstanceStatus, IpPermission, KeyPair, Region, ReservedInstancesOffering, SecurityGroup, Tag,
    TagDescription,
};

fn owned(value: Option<&str>) -> Option<String> {
    value.map(str::to_string)
}

fn datetime(dt: &DateTime) -> Option<chrono::DateTime<Utc>> {
    chrono::DateTime::from_timestamp(dt.secs(), dt.subsec_nanos())
}

fn state(state: Option<&sdk::InstanceState>) -> Option<InstanceState> {
    state
        .and_then(|s| s.name())
        .map(|name| InstanceState::from(name.as_str()))
}

fn tags(tags: &[sdk::Tag]) -> Vec<Tag> {
    tags.iter()
        .filter_map(|t| {
            let key = t.key()?;
            Some(Tag::new(key, t.value().unwrap_or_default()))
        })
        .collect()
}

pub(crate) fn instance(i: &sdk::Instance) -> Instance {
    Instance {
        instance_id: i.instance_id().unwrap_or_default().to_string(),
        image_id: owned(i.image_id()),
        instance_type: i.instance_type().map(|t| t.as_str().to_string()),
        state: state(i.state()).unwrap_or_else(|| InstanceState::Unknown("unknown".to_string())),
        key_name: owned(i.key_name()),
        launch_time: i.launch_time().and_then(datetime),
        availability_zone: owned(i.placement().and_then(|p| p.availability_zone())),
        private_ip_address: owned(i.private_ip_address()),
        public_ip_address: owned(i.public_ip_address()),
        private_dns_name: owned(i.private_dns_name()).filter(|s| !s.is_empty()),
        public_dns_name: owned(i.public_dns_name()).filter(|s| !s.is_empty()),
        vpc_id: owned(i.vpc_id()),
        subnet_id: owned(i.subnet_id()),
        security_groups: i
            .security_groups()
            .iter()
            .map(|g| GroupIdentifier {
                group_id: owned(g.group_id()),
                group_name: owned(g.group_name()),
            })
            .collect(),
        tags: tags(i.tags()),
        architecture: i.architecture().map(|a| a.as_str().to_string()),
        platform: i.platform().map(|p| p.as_str().to_string()),
    }
}

pub(crate) fn state_change(c: &sdk::InstanceStateChange) -> InstanceStateChange {
    InstanceStateChange {
        instance_id: c.instance_id().unwrap_or_default().to_string(),
        previous_state: state(c.previous_state()),
        current_state: state(c.current_state()),
    }
}

pub(crate) fn key_pair(k: &sdk::KeyPairInfo) -> KeyPair {
    KeyPair {
        name: k.key_name().unwrap_or_default().to_string(),
        fingerprint: owned(k.key_fingerprint()),
        key_pair_id: owned(k.key_pair_id()),
        key_type: k.key_type().map(|t| t.as_str().to_string()),
        material: None,
    }
}

pub(crate) fn created_key_pair(out: &CreateKeyPairOutput) -> KeyPair {
    KeyPair {
        name: out.key_name().unwrap_or_default().to_string(),
        fingerprint: owned(out.key_fingerprint()),
        key_pair_id: owned(out.key_pair_id()),
        key_type: None,
        material: owned(out.key_material()),
    }
}

pub(crate) fn imported_key_pair(out: &ImportKeyPairOutput) -> KeyPair {
    KeyPair {
        name: out.key_name().unwrap_or_default().to_string(),
        fingerprint: owned(out.key_fingerprint()),
        key_pair_id: owned(out.key_pair_id()),
        key_type: None,
        material: None,
    }
}

fn ip_permission(p: &sdk::IpPermission) -> IpPermission {
    let v4 = p.ip_ranges().iter().filter_map(|r| r.cidr_ip());
    let v6 = p.ipv6_ranges().iter().filter_map(|r| r.cidr_ipv6());
    IpPermission {
        protocol: p.ip_protocol().unwrap_or("-1").to_string(),
        from_port: p.from_port(),
        to_port: p.to_port(),
        cidr_ranges: v4.chain(v6).map(str::to_string).collect(),
    }
}

pub(crate) fn security_group(g: &sdk::SecurityGroup) -> SecurityGroup {
    SecurityGroup {
        group_id: g.group_id().unwrap_or_default().to_string(),
        group_name: g.group_name().unwrap_or_default().to_string(),
        description: owned(g.description()),
        vpc_id: owned(g.vpc_id()),
        owner_id: owned(g.owner_id()),
        ingress: g.ip_permissions().iter().map(ip_permission).collect(),
        egress: g.ip_permissions_egress().iter().map(ip_permission).collect(),
        tags: tags(g.tags()),
    }
}

pub(crate) fn tag_description(t: &sdk::TagDescription) -> TagDescription {
    TagDescription {
        resource_id: t.resource_id().unwrap_or_default().to_string(),
        resource_type: t.resource_type().map(|r| r.as_str().to_string()),
        key: t.key().unwrap_or_default().to_string(),
        value: t.value().unwrap_or_default().to_string(),
    }
}

pub(crate) fn instance_status(s: &sdk::InstanceStatus) -> InstanceStatus {
    InstanceStatus {
        instance_id: s.instance_id().unwrap_or_default().to_string(),
        availability_zone: owned(s.availability_zone()),
        state: state(s.instance_state())
            .unwrap_or_else(|| InstanceState::Unknown("unknown".to_string())),
        instance_status: s
            .instance_status()
            .and_then(|summary| summary.status())
            .map(|st| st.as_str().to_string()),
        system_status: s
            .system_status()
            .and_then(|summary| summary.status())
            .map(|st| st.as_str().to_string()),
    }
}

pub(crate) fn offering(o: &sdk::ReservedInstancesOffering) -> ReservedInstancesOffering {
    ReservedInstancesOffering {
        offering_id: o
            .reserved_instances_offering_id()
            .unwrap_or_default()
            .to_string(),
        instance_type: o.instance_type().map(|t| t.as_str().to_string()),
        availability_zone: owned(o.availability_zone()),
        duration: o.duration(),
        fixed_price: o.fixed_price(),
        usage_price: o.usage_price(),
        currency_code: o.currency_code().map(|c| c.as_str().to_string()),
        product_description: o.product_description().map(|p| p.as_str().to_string()),
        offering_type: o.offering_type().map(|t| t.as_str().to_string()),
        instance_tenancy: o.instance_tenancy().map(|t| t.as_str().to_string()),
        marketplace: o.marketplace().unwrap_or(false),
    }
}

pub(crate) fn region(r: &sdk::Region) -> Region {
    Region {
        name: r.region_name().unwrap_or_default().to_string(),
        endpoint: owned(r.endpoint()),
    }
}

pub(crate) fn availability_zone(z: &sdk::AvailabilityZone) -> AvailabilityZone {
    AvailabilityZone {
        name: z.zone_name().unwrap_or_default().to_string(),
        region: owned(z.region_name()),
        state: z.state().map(|s| s.as_str().to_string()),
    }
}

// ---- wrapper types → SDK request types ----

pub(crate) fn sdk_tag(tag: &Tag) -> sdk::Tag {
    sdk::Tag::builder().key(&tag.key).value(&tag.value).build()
}

pub(crate) fn sdk_tags(tags: &[Tag]) -> Vec<sdk::Tag> {
    tags.iter().map(sdk_tag).collect()
}

pub(crate) fn sdk_filters(filters: &[Filter]) -> Option<Vec<sdk::Filter>> {
    if filters.is_empty() {
        return None;
    }
    Some(
        filters
            .iter()
            .map(|f| {
                sdk::Filter::builder()
                    .name(&f.name)
                    .set_values(Some(f.values.clone()))
                    .build()
            })
            .collect(),
    )
}

pub(crate) fn sdk_permission(p: &IpPermission) -> sdk::IpPermission {
    let (v6, v4): (Vec<&String>, Vec<&String>) =
        p.cidr_ranges.iter().partition(|c| c.contains(':'));

    sdk::IpPermission::builder()
        .ip_protocol(&p.protocol)
        .set_from_port(p.from_port)
        .set_to_port(p.to_port)
        .set_ip_ranges(Some(
            v4.into_iter()
                .map(|c| sdk::IpRange::builder().cidr_ip(c).build())
                .collect(),
        ))
        .set_ipv6_ranges(Some(
            v6.into_iter()
                .map(|c| sdk::Ipv6Range::builder().cidr_ipv6(c).build())
                .collect(),
        ))
        .build()
}

/// Empty list means "no filter" for describe calls
pub(crate) fn id_list(ids: &[String]) -> Option<Vec<String>> {
    (!ids.is_empty()).then(|| ids.to_vec())
}
